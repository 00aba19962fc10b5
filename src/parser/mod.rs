//! Text scraping of the suite's run log and console output.
//!
//! Everything that depends on the suite's text formats is confined to this
//! module.

pub mod log;
pub mod table;

pub use log::{read_log, LogFormat};
pub use table::parse_results_table;

#[cfg(test)]
pub(crate) mod fixtures {
    //! Captured suite output shared by the step tests.

    /// Console output of `make -s certify-all`.
    pub const CERTIFY_OUTPUT: &str = "\
Starting run...
WORKLOAD RESULTS TABLE

                                                 MultiCore SingleCore
Workload Name                                     (iter/s)   (iter/s)    Scaling
----------------------------------------------- ---------- ---------- ----------
cjpeg-rose7-preset                                  178.57     178.57       1.00
core                                                  1.10       2.20       3.30
linear_alg-mid-100x100-sp                           625.00     625.00       1.00
loops-all-mid-10k-sp                                  2.85       2.85       1.00
nnet_test                                             4.31       4.31       1.00
parser-125k                                          37.04      37.04       1.00
radix2-big-64k                                      165.02     165.02       1.00
sha-test                                            212.77     212.77       1.00
zip-test                                             90.91      90.91       1.00

MARK RESULTS TABLE

Mark Name                                        MultiCore SingleCore    Scaling
----------------------------------------------- ---------- ---------- ----------
CoreMark-PRO                                       4512.34    4512.34       1.00
";

    /// Run log with one median line per workload.
    ///
    /// Times are chosen so that a two-second target gives 1..=9 iterations in
    /// catalog order, and the logged counts match those targets.
    pub const RUN_LOG: &str = "\
#UID            Suite Name                     Ctx Wrk Fails       t(s)       Iter     Iter/s  Codesize   Datasize
#Results for performance runs started at 23040:10:00:00 XCMD=-v1
median single cjpeg-rose7-preset                 1   1     0      2.000          1       0.50    101618     266586
median single core                               1   1     0      1.000          2       1.00     18086      41958
median single linear_alg-mid-100x100-sp          1   1     0      0.700          3       1.43     17742      82376
median single loops-all-mid-10k-sp               1   1     0      0.500          4       2.00     22388    1103128
median single nnet_test                          1   1     0      0.400          5       2.50     20770     137992
median single parser-125k                        1   1     0      0.350          6       2.86     21690     552336
median single radix2-big-64k                     1   1     0      0.300          7       3.33     11842    1051128
median single sha-test                           1   1     0      0.250          8       4.00     15082      73552
median single zip-test                           1   1     0      0.225          9       4.44     20722     563880
median single CoreMark-PRO                       1   1     0      4.000          1       0.25         0          0
";
}
