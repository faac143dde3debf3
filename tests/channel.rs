mod tests {
    use fireflame_composer::{EdgeEvent, EdgeQueue, Instant, QueueFull};

    fn edge(at_ms: u64) -> EdgeEvent {
        EdgeEvent {
            pin: 23,
            at: Instant::from_millis(at_ms),
        }
    }

    #[test]
    fn test_edges_come_out_in_order() {
        let queue = EdgeQueue::<4>::new();
        let sender = queue.sender();
        let receiver = queue.receiver();

        sender.notify(edge(1)).unwrap();
        sender.notify(edge(2)).unwrap();

        assert_eq!(queue.len(), 2);
        assert_eq!(receiver.try_receive(), Some(edge(1)));
        assert_eq!(receiver.try_receive(), Some(edge(2)));
        assert_eq!(receiver.try_receive(), None);
        assert!(receiver.is_empty());
    }

    #[test]
    fn test_full_queue_drops_new_edges() {
        let queue = EdgeQueue::<2>::new();
        let sender = queue.sender();

        sender.notify(edge(1)).unwrap();
        sender.notify(edge(2)).unwrap();
        assert_eq!(sender.notify(edge(3)), Err(QueueFull(edge(3))));
        assert_eq!(queue.dropped(), 1);
        assert_eq!(queue.receiver().try_receive(), Some(edge(1)));
    }

    #[test]
    fn test_discard_pending() {
        let queue = EdgeQueue::<8>::new();
        for at in 0..5 {
            queue.sender().notify(edge(at)).unwrap();
        }
        assert_eq!(queue.receiver().discard_pending(), 5);
        assert!(queue.is_empty());
        assert_eq!(queue.receiver().discard_pending(), 0);
    }

    static SHARED_EDGES: EdgeQueue<64> = EdgeQueue::new();

    #[test]
    fn test_edges_from_other_threads() {
        std::thread::scope(|scope| {
            for thread in 0..4u64 {
                scope.spawn(move || {
                    let sender = SHARED_EDGES.sender();
                    for i in 0..10 {
                        sender.notify(edge(thread * 100 + i)).unwrap();
                    }
                });
            }
        });

        let receiver = SHARED_EDGES.receiver();
        let mut received = 0;
        while receiver.try_receive().is_some() {
            received += 1;
        }
        assert_eq!(received, 40);
        assert_eq!(SHARED_EDGES.dropped(), 0);
    }
}
