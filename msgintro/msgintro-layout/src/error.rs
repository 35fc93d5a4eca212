/// Failure to lay out a buffer against a definition tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// A count, length prefix, or leaf extends past the end of the buffer.
    #[error(
        "unexpected end of buffer at '{path}': need {needed} bytes at offset {offset}, buffer has {len}"
    )]
    UnexpectedEof {
        path: String,
        offset: usize,
        needed: usize,
        len: usize,
    },
}
