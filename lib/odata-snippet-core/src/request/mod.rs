//! Captured requests and their decomposition into path elements and query pairs.

mod captured;
pub use self::captured::{CapturedRequest, RequestHeaders};

mod decompose;
pub(crate) use self::decompose::{decompose, split_query};

mod body;
pub use self::body::RequestBody;
