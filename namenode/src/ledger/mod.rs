pub mod json_ledger;
pub mod recorder;
pub mod replayer;

use recorder::Recorder;
use replayer::Replayer;

pub trait Ledger: Replayer + Recorder {}
impl<T: Recorder + Replayer> Ledger for T {}
