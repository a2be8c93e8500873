// Word-of-the-day module - one random word per calendar day, picked lazily

mod cache;
mod clock;

pub use cache::{WordOfDayCache, WordOfDayState, WordSource};
pub use clock::{Clock, ManualClock, SystemClock};
