use derive_new::new;

#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct ListOptions {
    pub limit: i64,
    pub offset: i64,
}

impl ListOptions {
    pub const DEFAULT_LIMIT: i64 = 100;
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            limit: Self::DEFAULT_LIMIT,
            offset: 0,
        }
    }
}
