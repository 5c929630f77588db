//! Reply generator adapters.

mod fallback;
mod mock;

pub use fallback::{CannedReplies, FallbackReplyGenerator};
pub use mock::MockReplyGenerator;
