/// Single and bulk resolution.
pub mod resolve;
/// Attempt bookkeeping shared by both fetch strategies.
pub mod util;
