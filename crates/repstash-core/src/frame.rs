//! Marker-delimited payload framing over 32-byte chunks.
//!
//! A frame is `BEGIN_MARKER || payload || END_MARKER`, zero-padded to a
//! multiple of [`Chunk::SIZE`] and split into chunks. Writing publishes one
//! chunk per ledger block; reading concatenates the recovered chunks and
//! scans for frames.
//!
//! The markers are opaque byte constants inherited from the wire format.
//! They are verified in full at every candidate position, so marker bytes
//! occurring inside payload data never cause a false state transition.

use crate::types::Chunk;

/// Start-of-frame sentinel.
pub const BEGIN_MARKER: [u8; 10] = *b"begindata\0";

/// End-of-frame sentinel.
pub const END_MARKER: [u8; 10] = *b"\0\0enddata\0";

/// Split a payload into its framed, padded chunk sequence.
///
/// The empty payload is legal and frames to a single chunk pair of
/// markers plus padding. When the framed length is already a multiple of
/// [`Chunk::SIZE`], no padding is added.
pub fn build_frames(payload: &[u8]) -> Vec<Chunk> {
    let mut buf =
        Vec::with_capacity(BEGIN_MARKER.len() + payload.len() + END_MARKER.len() + Chunk::SIZE);
    buf.extend_from_slice(&BEGIN_MARKER);
    buf.extend_from_slice(payload);
    buf.extend_from_slice(&END_MARKER);

    let rem = buf.len() % Chunk::SIZE;
    if rem != 0 {
        buf.resize(buf.len() + Chunk::SIZE - rem, 0);
    }

    buf.chunks_exact(Chunk::SIZE)
        .map(|window| {
            let mut bytes = [0u8; Chunk::SIZE];
            bytes.copy_from_slice(window);
            Chunk(bytes)
        })
        .collect()
}

/// Scan a chunk sequence for embedded payloads.
///
/// Returns a lazy iterator: each call to `next` resumes the scan where
/// the previous payload ended. Chunk order is significant; the caller
/// must supply chunks oldest-first.
///
/// The scan never fails. A begin marker with no matching end marker
/// before the input runs out drops the open capture and terminates;
/// stray marker-first bytes in the noise between frames are skipped.
pub fn extract_payloads(chunks: &[Chunk]) -> Payloads {
    let mut data = Vec::with_capacity(chunks.len() * Chunk::SIZE);
    for chunk in chunks {
        data.extend_from_slice(chunk.as_bytes());
    }
    Payloads { data, pos: 0 }
}

/// Lazy payload iterator over a concatenated chunk stream.
///
/// Created by [`extract_payloads`].
pub struct Payloads {
    data: Vec<u8>,
    pos: usize,
}

impl Payloads {
    /// Locate the next full occurrence of `marker` at or after `from`.
    fn find_marker(&self, marker: &[u8], from: usize) -> Option<usize> {
        let len = self.data.len();
        let mut i = from;
        while i + marker.len() <= len {
            if self.data[i] == marker[0] && self.data[i..i + marker.len()] == *marker {
                return Some(i);
            }
            i += 1;
        }
        None
    }
}

impl Iterator for Payloads {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Vec<u8>> {
        // Searching: a first-byte hit alone is not enough, the full begin
        // marker must verify at the candidate position.
        let begin = self.find_marker(&BEGIN_MARKER, self.pos)?;
        let start = begin + BEGIN_MARKER.len();

        // Capturing: accumulate until the full end marker verifies.
        match self.find_marker(&END_MARKER, start) {
            Some(end) => {
                self.pos = end + END_MARKER.len();
                Some(self.data[start..end].to_vec())
            }
            None => {
                // Truncated frame: the open capture is dropped, not
                // emitted partially. Terminal state.
                self.pos = self.data.len();
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(payload: &[u8]) -> Vec<Vec<u8>> {
        extract_payloads(&build_frames(payload)).collect()
    }

    #[test]
    fn test_roundtrip_simple() {
        assert_eq!(roundtrip(b"hello world"), vec![b"hello world".to_vec()]);
    }

    #[test]
    fn test_roundtrip_empty_payload() {
        assert_eq!(roundtrip(b""), vec![Vec::<u8>::new()]);
    }

    #[test]
    fn test_chunks_are_32_bytes_and_padded() {
        // 12 payload bytes + 20 marker bytes = 32: exactly one chunk,
        // zero padding.
        let chunks = build_frames(&[0xaa; 12]);
        assert_eq!(chunks.len(), 1);

        // One byte more spills into a second, zero-padded chunk.
        let chunks = build_frames(&[0xaa; 13]);
        assert_eq!(chunks.len(), 2);
        assert_eq!(&chunks[1].as_bytes()[1..], &[0u8; 31]);
    }

    #[test]
    fn test_multi_frame_stream() {
        let mut chunks = build_frames(b"first");
        chunks.extend(build_frames(b"second"));
        chunks.extend(build_frames(b"third"));
        assert_eq!(
            extract_payloads(&chunks).collect::<Vec<_>>(),
            vec![b"first".to_vec(), b"second".to_vec(), b"third".to_vec()]
        );
    }

    #[test]
    fn test_marker_bytes_inside_payload() {
        // A payload containing the begin marker's first byte, a full
        // begin marker, and an end-marker first byte must survive intact.
        let mut payload = b"b".to_vec();
        payload.extend_from_slice(&BEGIN_MARKER);
        payload.push(0x00);
        payload.extend_from_slice(b"tail");
        assert_eq!(roundtrip(&payload), vec![payload.clone()]);
    }

    #[test]
    fn test_truncated_frame_dropped() {
        let mut chunks = build_frames(b"complete");
        // A begin marker with no end marker: open capture is dropped.
        let mut dangling = [0u8; 32];
        dangling[..BEGIN_MARKER.len()].copy_from_slice(&BEGIN_MARKER);
        dangling[BEGIN_MARKER.len()..].copy_from_slice(&[0x61; 22]);
        chunks.push(Chunk(dangling));

        assert_eq!(
            extract_payloads(&chunks).collect::<Vec<_>>(),
            vec![b"complete".to_vec()]
        );
    }

    #[test]
    fn test_noise_before_and_between_frames() {
        let mut chunks = vec![Chunk([0x62; 32])]; // 'b' noise, no marker
        chunks.extend(build_frames(b"signal"));
        chunks.push(Chunk([0x13; 32]));
        chunks.extend(build_frames(b"more"));
        assert_eq!(
            extract_payloads(&chunks).collect::<Vec<_>>(),
            vec![b"signal".to_vec(), b"more".to_vec()]
        );
    }

    #[test]
    fn test_empty_stream() {
        assert_eq!(extract_payloads(&[]).count(), 0);
    }

    #[test]
    fn test_markers_excluded_from_payload() {
        for payload in roundtrip(b"x") {
            assert!(!payload
                .windows(BEGIN_MARKER.len())
                .any(|w| w == BEGIN_MARKER));
        }
    }
}
