//! Slicing the packed bitmap stream into data packets.

/// Accumulates bytes and cuts them into packets of at most `max` bytes.
///
/// Only the final packet may be shorter than `max`; packets carry no framing
/// of their own, their order is the only index the badge gets.
#[derive(Debug)]
pub struct PacketChunker {
    max: usize,
    current: Vec<u8>,
    packets: Vec<Vec<u8>>,
}

impl PacketChunker {
    /// Panics when `max` is zero; profiles reject that before encoding starts.
    pub fn new(max: usize) -> Self {
        assert!(max > 0, "packet size must be non-zero");
        Self {
            max,
            current: Vec::with_capacity(max),
            packets: Vec::new(),
        }
    }

    /// Append bytes, cutting a packet whenever the buffer fills up
    pub fn extend(&mut self, mut bytes: &[u8]) {
        while !bytes.is_empty() {
            let take = (self.max - self.current.len()).min(bytes.len());
            self.current.extend_from_slice(&bytes[..take]);
            bytes = &bytes[take..];
            if self.current.len() == self.max {
                let full = std::mem::replace(&mut self.current, Vec::with_capacity(self.max));
                self.packets.push(full);
            }
        }
    }

    /// Flush the partial buffer and return all packets in order
    pub fn finish(mut self) -> Vec<Vec<u8>> {
        if !self.current.is_empty() {
            self.packets.push(self.current);
        }
        self.packets
    }
}

/// Chunk a complete byte stream
pub fn chunk(bytes: &[u8], max: usize) -> Vec<Vec<u8>> {
    let mut chunker = PacketChunker::new(max);
    chunker.extend(bytes);
    chunker.finish()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn empty_stream_has_no_packets() {
        assert!(chunk(&[], 64).is_empty());
    }

    #[test]
    fn glyph_rows_straddle_packet_boundary() {
        // six 11 byte cells = 66 bytes, the sixth cell is split 9/2
        let stream: Vec<u8> = (0..66).collect();
        let mut chunker = PacketChunker::new(64);
        for cell in stream.chunks(11) {
            chunker.extend(cell);
        }
        let packets = chunker.finish();
        assert_eq!(packets.len(), 2);
        assert_eq!(packets[0].len(), 64);
        assert_eq!(packets[1], vec![64, 65]);
    }

    #[test]
    fn exact_multiple_has_no_trailing_packet() {
        let packets = chunk(&[7; 128], 64);
        assert_eq!(packets.len(), 2);
        assert!(packets.iter().all(|p| p.len() == 64));
    }

    proptest! {
        #[test]
        fn concatenation_reproduces_stream(
            stream in proptest::collection::vec(any::<u8>(), 0..600),
            max in 1usize..100,
        ) {
            let packets = chunk(&stream, max);
            prop_assert_eq!(packets.len(), stream.len().div_ceil(max));
            if let Some((last, full)) = packets.split_last() {
                prop_assert!(full.iter().all(|p| p.len() == max));
                prop_assert!(!last.is_empty() && last.len() <= max);
            }
            prop_assert_eq!(packets.concat(), stream);
        }

        #[test]
        fn split_feeding_matches_whole_feeding(
            stream in proptest::collection::vec(any::<u8>(), 0..300),
            piece in 1usize..20,
        ) {
            let mut chunker = PacketChunker::new(64);
            for part in stream.chunks(piece) {
                chunker.extend(part);
            }
            prop_assert_eq!(chunker.finish(), chunk(&stream, 64));
        }
    }
}
