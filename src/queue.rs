use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::instruction::Instruction;

/// Max-priority queue of instructions, FIFO within a priority rank.
///
/// Entries drain by descending [`InstructionType::priority`], then by the
/// order they were enqueued. Insertion order comes from a sequence counter
/// owned by the queue; it only ever increases, so an instruction enqueued
/// after a dequeue still sorts behind everything of equal rank already
/// waiting. Type codes outside {A, B, C, D} rank below every valid class.
///
/// The queue does no business validation.
///
/// [`InstructionType::priority`]: crate::instruction::InstructionType::priority
#[derive(Debug, Default)]
pub struct PriorityQueue {
    heap: BinaryHeap<QueueEntry>,
    next_seq: u64,
}

/// Heap entry. Ordering ignores the instruction payload.
#[derive(Debug)]
struct QueueEntry {
    rank: u8,
    seq: u64,
    instruction: Instruction,
}

impl QueueEntry {
    fn new(instruction: Instruction, seq: u64) -> Self {
        let rank = instruction
            .instruction_type()
            .map_or(0, |kind| kind.priority());
        Self {
            rank,
            seq,
            instruction,
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Primary: rank (higher first)
        // Secondary: seq (lower first)
        self.rank
            .cmp(&other.rank)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PriorityQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            next_seq: 0,
        }
    }

    /// Enqueues `instruction`; `None` is ignored.
    pub fn enqueue(&mut self, instruction: Option<Instruction>) {
        if let Some(instruction) = instruction {
            self.push(instruction);
        }
    }

    pub fn push(&mut self, instruction: Instruction) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(QueueEntry::new(instruction, seq));
    }

    /// Removes the highest-priority, earliest-enqueued instruction.
    pub fn dequeue(&mut self) -> Option<Instruction> {
        self.heap.pop().map(|entry| entry.instruction)
    }

    pub fn peek(&self) -> Option<&Instruction> {
        self.heap.peek().map(|entry| &entry.instruction)
    }

    pub fn count(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Dequeues everything, in priority order.
    pub fn drain(&mut self) -> impl Iterator<Item = Instruction> + '_ {
        std::iter::from_fn(move || self.dequeue())
    }

    /// Drops all entries. The sequence counter keeps running.
    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

impl Extend<Instruction> for PriorityQueue {
    fn extend<I: IntoIterator<Item = Instruction>>(&mut self, iter: I) {
        for instruction in iter {
            self.push(instruction);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PriorityQueue;
    use crate::instruction::Instruction;
    use time::macros::datetime;

    fn instr(type_code: &str, quantity: i32) -> Instruction {
        Instruction::new(
            type_code,
            "MZ89",
            quantity,
            50,
            datetime!(2015-03-05 10:04:56.012 UTC),
        )
    }

    fn drain_pairs(queue: &mut PriorityQueue) -> Vec<(String, i32)> {
        queue
            .drain()
            .map(|i| (i.type_code().to_string(), i.quantity()))
            .collect()
    }

    #[test]
    fn enqueue_counts() {
        let mut queue = PriorityQueue::new();
        assert!(queue.is_empty());
        queue.enqueue(Some(instr("A", 1)));
        assert_eq!(queue.count(), 1);
        queue.enqueue(None);
        assert_eq!(queue.count(), 1);
        assert!(!queue.is_empty());
    }

    #[test]
    fn empty_queue_yields_none() {
        let mut queue = PriorityQueue::new();
        assert!(queue.peek().is_none());
        assert!(queue.dequeue().is_none());
        assert_eq!(queue.count(), 0);
    }

    #[test]
    fn higher_rank_first() {
        let mut queue = PriorityQueue::new();
        queue.push(instr("B", 1));
        queue.push(instr("A", 2));
        queue.push(instr("C", 3));
        assert_eq!(
            drain_pairs(&mut queue),
            vec![("A".into(), 2), ("B".into(), 1), ("C".into(), 3)]
        );
    }

    #[test]
    fn c_and_d_tie_on_insertion_order() {
        let mut queue = PriorityQueue::new();
        queue.push(instr("D", 1));
        queue.push(instr("C", 2));
        assert_eq!(
            drain_pairs(&mut queue),
            vec![("D".into(), 1), ("C".into(), 2)]
        );

        queue.push(instr("C", 3));
        queue.push(instr("D", 4));
        assert_eq!(
            drain_pairs(&mut queue),
            vec![("C".into(), 3), ("D".into(), 4)]
        );
    }

    #[test]
    fn same_type_is_fifo() {
        let mut queue = PriorityQueue::new();
        for quantity in 1..=3 {
            queue.push(instr("B", quantity));
        }
        assert_eq!(
            drain_pairs(&mut queue),
            vec![("B".into(), 1), ("B".into(), 2), ("B".into(), 3)]
        );
    }

    #[test]
    fn peek_matches_dequeue_without_removing() {
        let mut queue = PriorityQueue::new();
        queue.push(instr("C", 1));
        queue.push(instr("A", 2));
        assert_eq!(queue.peek().map(|i| i.quantity()), Some(2));
        assert_eq!(queue.count(), 2);
        assert_eq!(queue.dequeue().map(|i| i.quantity()), Some(2));
        assert_eq!(queue.count(), 1);
    }

    #[test]
    fn interleaved_operations_keep_insertion_order() {
        let mut queue = PriorityQueue::new();
        queue.push(instr("A", 1));
        queue.push(instr("A", 2));
        assert_eq!(queue.dequeue().map(|i| i.quantity()), Some(1));
        queue.push(instr("A", 3));
        queue.push(instr("A", 1));
        assert_eq!(
            drain_pairs(&mut queue),
            vec![("A".into(), 2), ("A".into(), 3), ("A".into(), 1)]
        );
    }

    #[test]
    fn clear_does_not_reset_sequence() {
        let mut queue = PriorityQueue::new();
        queue.push(instr("B", 1));
        queue.clear();
        assert!(queue.is_empty());
        queue.push(instr("B", 2));
        queue.push(instr("B", 3));
        assert_eq!(
            drain_pairs(&mut queue),
            vec![("B".into(), 2), ("B".into(), 3)]
        );
    }

    #[test]
    fn unknown_type_ranks_last() {
        let mut queue = PriorityQueue::new();
        queue.push(instr("Z", 1));
        queue.push(instr("D", 2));
        assert_eq!(queue.peek().map(|i| i.type_code()), Some("D"));
    }

    #[test]
    fn extend_preserves_order() {
        let mut queue = PriorityQueue::with_capacity(4);
        queue.extend([instr("C", 1), instr("B", 2), instr("C", 3), instr("A", 4)]);
        assert_eq!(
            drain_pairs(&mut queue),
            vec![
                ("A".into(), 4),
                ("B".into(), 2),
                ("C".into(), 1),
                ("C".into(), 3)
            ]
        );
    }
}
