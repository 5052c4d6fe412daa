//! Seams between the codec and the stages that surround it.
//!
//! The codec itself neither reassembles split messages nor packs packets into datagrams; those
//! jobs belong to the reassembly manager and the datagram assembler of the surrounding stack.
//! These traits pin down the narrow contracts the codec is consumed through, so that the stack
//! can be wired together without either side knowing the other's internals.

use crate::packet::{EncapsulatedPacket, SplitId};

/// Rebuilds complete messages out of the fragments of a split group.
///
/// Fed one fully-decoded packet at a time, keyed by the identifier its split group shares.
/// Implementations buffer fragments until the group is complete.
pub trait MessageReassembler {
    /// Offer one fragment to the reassembler.
    ///
    /// Returns the reassembled message once the last missing fragment of the group arrives,
    /// `None` while fragments are still outstanding.
    fn accept(&mut self, key: SplitId, packet: EncapsulatedPacket) -> Option<Box<[u8]>>;
}

/// Groups encapsulated packets into datagram-sized batches.
///
/// Grouping decisions are driven by [`EncapsulatedPacket::wire_size`] so that a batch can be
/// sized without encoding anything.
pub trait DatagramAssembler {
    /// Split `packets` into groups whose summed wire size stays within `max_datagram_size`.
    fn assemble(
        &mut self,
        packets: Vec<EncapsulatedPacket>,
        max_datagram_size: usize,
    ) -> Vec<Vec<EncapsulatedPacket>>;
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::packet::header::SplitHeader;
    use crate::packet::{EncapsulatedPacket, SplitId};

    use super::{DatagramAssembler, MessageReassembler};

    // Minimal reassembler: keeps fragments per split group, emits once the count is reached.
    struct TestReassembler {
        pending: HashMap<SplitId, Vec<EncapsulatedPacket>>,
    }

    impl MessageReassembler for TestReassembler {
        fn accept(&mut self, key: SplitId, packet: EncapsulatedPacket) -> Option<Box<[u8]>> {
            let group = self.pending.entry(key).or_default();
            group.push(packet);

            let count = group[0].split().unwrap().count() as usize;
            if group.len() < count {
                return None;
            }

            let mut group = self.pending.remove(&key).unwrap();
            group.sort_by_key(|fragment| fragment.split().unwrap().index());
            let message: Vec<u8> = group
                .iter()
                .flat_map(|fragment| fragment.payload().to_vec())
                .collect();
            Some(message.into_boxed_slice())
        }
    }

    // Minimal assembler: first-fit into the current group, new group when the packet won't fit.
    struct TestAssembler;

    impl DatagramAssembler for TestAssembler {
        fn assemble(
            &mut self,
            packets: Vec<EncapsulatedPacket>,
            max_datagram_size: usize,
        ) -> Vec<Vec<EncapsulatedPacket>> {
            let mut groups: Vec<Vec<EncapsulatedPacket>> = Vec::new();
            let mut used = 0;

            for packet in packets {
                let size = packet.wire_size();
                if groups.is_empty() || used + size > max_datagram_size {
                    groups.push(Vec::new());
                    used = 0;
                }
                used += size;
                groups.last_mut().unwrap().push(packet);
            }

            groups
        }
    }

    fn fragment(id: SplitId, index: i32, count: i32, payload: &[u8]) -> EncapsulatedPacket {
        EncapsulatedPacket::reliable(payload.to_vec(), index as u32)
            .with_split(SplitHeader::new(count, id, index))
    }

    #[test]
    fn reassembles_once_the_group_is_complete() {
        let mut reassembler = TestReassembler {
            pending: HashMap::new(),
        };

        // out of order on purpose
        assert_eq!(reassembler.accept(7, fragment(7, 1, 3, b"lo ")), None);
        assert_eq!(reassembler.accept(7, fragment(7, 0, 3, b"hel")), None);
        let message = reassembler.accept(7, fragment(7, 2, 3, b"world")).unwrap();

        assert_eq!(message.as_ref(), b"hello world");
    }

    #[test]
    fn groups_stay_within_the_datagram_size() {
        let packets: Vec<EncapsulatedPacket> = (0..10)
            .map(|index| EncapsulatedPacket::reliable(vec![0; 100], index))
            .collect();
        let max_datagram_size = 250;

        let groups = TestAssembler.assemble(packets, max_datagram_size);

        assert!(groups.len() > 1);
        for group in &groups {
            let size: usize = group.iter().map(EncapsulatedPacket::wire_size).sum();
            assert!(size <= max_datagram_size);
        }
        assert_eq!(
            groups.iter().map(Vec::len).sum::<usize>(),
            10,
            "no packet may be dropped while grouping"
        );
    }
}
