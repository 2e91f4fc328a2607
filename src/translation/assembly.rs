/*!
 * Reassembly of translated chunks.
 */

use super::core::ChunkResult;

/// Separator placed between consecutive chunks
pub const CHUNK_SEPARATOR: &str = "\n\n";

/// Join chunk results in their original order
pub fn join_chunks(results: &[ChunkResult]) -> String {
    results
        .iter()
        .map(|r| r.text.as_str())
        .collect::<Vec<_>>()
        .join(CHUNK_SEPARATOR)
}
