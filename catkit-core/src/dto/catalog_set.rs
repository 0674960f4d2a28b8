//! Catalog set pagination DTOs

use serde::Serialize;

/// Cursor over the paginated members endpoint.
///
/// The endpoint has no next-page token; the caller advances `skip` by the
/// page limit and stops on the first empty batch.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PageCursor {
    pub limit: usize,
    pub skip: usize,
}

impl PageCursor {
    pub const DEFAULT_LIMIT: usize = 100;

    pub fn first() -> Self {
        Self {
            limit: Self::DEFAULT_LIMIT,
            skip: 0,
        }
    }

    /// Moves the cursor past the page just fetched.
    pub fn advance(&mut self) {
        self.skip += self.limit;
    }
}
