use instruction_queue::{parse, Instruction, PriorityQueue};

fn message(type_code: &str, quantity: u32) -> Instruction {
    parse(&format!(
        "InstructionMessage {type_code} MZ89 {quantity} 50 2015-03-05T10:04:56.012Z"
    ))
    .expect("parse")
}

fn drain(queue: &mut PriorityQueue) -> Vec<(String, i32)> {
    let mut seen = Vec::new();
    while let Some(instruction) = queue.dequeue() {
        seen.push((instruction.type_code().to_string(), instruction.quantity()));
    }
    seen
}

#[test]
fn dequeues_by_priority_class() {
    let mut queue = PriorityQueue::new();
    queue.enqueue(Some(message("B", 1)));
    queue.enqueue(Some(message("A", 2)));
    queue.enqueue(Some(message("C", 3)));

    assert_eq!(
        drain(&mut queue),
        vec![
            ("A".to_string(), 2),
            ("B".to_string(), 1),
            ("C".to_string(), 3),
        ]
    );
}

#[test]
fn equal_rank_types_drain_in_arrival_order() {
    let mut queue = PriorityQueue::new();
    queue.enqueue(Some(message("D", 1)));
    queue.enqueue(Some(message("C", 2)));

    assert_eq!(
        drain(&mut queue),
        vec![("D".to_string(), 1), ("C".to_string(), 2)]
    );
}

#[test]
fn same_type_drains_in_arrival_order() {
    let mut queue = PriorityQueue::new();
    for quantity in [30, 10, 20] {
        queue.enqueue(Some(message("A", quantity)));
    }

    assert_eq!(
        drain(&mut queue),
        vec![
            ("A".to_string(), 30),
            ("A".to_string(), 10),
            ("A".to_string(), 20),
        ]
    );
}

#[test]
fn sequence_survives_interleaved_dequeues() {
    let mut queue = PriorityQueue::new();
    queue.enqueue(Some(message("B", 1)));
    queue.enqueue(Some(message("B", 2)));
    queue.enqueue(Some(message("A", 3)));

    let first = queue.dequeue().expect("first");
    assert_eq!(first.type_code(), "A");

    // Re-enqueue a B; it must sort behind the Bs already waiting.
    queue.enqueue(Some(message("B", 1)));
    queue.enqueue(Some(message("C", 4)));
    queue.enqueue(Some(message("A", 5)));

    assert_eq!(
        drain(&mut queue),
        vec![
            ("A".to_string(), 5),
            ("B".to_string(), 1),
            ("B".to_string(), 2),
            ("B".to_string(), 1),
            ("C".to_string(), 4),
        ]
    );
}

#[test]
fn empty_queue_returns_none() {
    let mut queue = PriorityQueue::new();
    assert!(queue.peek().is_none());
    assert!(queue.dequeue().is_none());

    queue.enqueue(None);
    assert_eq!(queue.count(), 0);
    assert!(queue.is_empty());
}

#[test]
fn dequeue_transfers_ownership() {
    let mut queue = PriorityQueue::new();
    let original = message("C", 9);
    queue.enqueue(Some(original.clone()));
    assert_eq!(queue.peek(), Some(&original));

    let taken = queue.dequeue().expect("dequeue");
    assert_eq!(taken, original);
    assert_eq!(queue.count(), 0);
}
