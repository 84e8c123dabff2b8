/// The single free-text scratchpad shown next to the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickNote {
    pub id: i64,
    pub content: String,
}
