//! Tests for concurrent registry mutation and competing consumers

#[cfg(test)]
mod tests {
    use crate::queue::api::{Consumer, IntMessage, Producer, Queue, QueueManager, Topic};
    use serial_test::serial;
    use std::sync::mpsc;
    use std::sync::{Arc, Barrier};
    use std::thread;

    fn four_pairs() -> Vec<(Topic, Arc<Queue<i32>>)> {
        let topic1 = Topic::new("topic1");
        let topic2 = Topic::new("topic2");
        vec![
            (topic1.clone(), Arc::new(Queue::new("test11"))),
            (topic1, Arc::new(Queue::new("test12"))),
            (topic2.clone(), Arc::new(Queue::new("test21"))),
            (topic2, Arc::new(Queue::new("test22"))),
        ]
    }

    #[test]
    #[serial]
    fn test_relate_and_unrelate_multi_thread() {
        let manager = QueueManager::<i32>::instance();
        manager.flush();
        let pairs = four_pairs();

        // The relating thread hands each pair over once it is related, so the
        // two threads interleave while every unrelate follows its relate
        let (related_tx, related_rx) = mpsc::channel::<usize>();

        thread::scope(|s| {
            s.spawn(|| {
                for (index, (topic, queue)) in pairs.iter().enumerate() {
                    manager.relate(topic, queue);
                    related_tx.send(index).unwrap();
                }
                drop(related_tx);
            });
            s.spawn(|| {
                for index in related_rx {
                    let (topic, queue) = &pairs[index];
                    manager.unrelate(topic, queue);
                }
            });
        });

        assert_eq!(manager.related_queues(&Topic::new("topic1")).len(), 0);
        assert_eq!(manager.related_queues(&Topic::new("topic2")).len(), 0);
    }

    #[test]
    fn test_concurrent_relate_has_no_duplicates() {
        let manager = Arc::new(QueueManager::<i32>::new());
        let topic = Topic::new("crowded");
        let queues: Vec<_> = (0..8)
            .map(|i| Arc::new(Queue::new(format!("q{i}"))))
            .collect();
        let barrier = Barrier::new(6);

        // Six threads race to relate the same eight queues
        thread::scope(|s| {
            for _ in 0..6 {
                s.spawn(|| {
                    barrier.wait();
                    for queue in &queues {
                        manager.relate(&topic, queue);
                    }
                });
            }
        });

        assert_eq!(manager.related_queues(&topic).len(), 8);
        assert_eq!(manager.relation_count(), 8);
    }

    #[test]
    fn test_concurrent_disjoint_mutations_converge() {
        let manager = Arc::new(QueueManager::<i32>::new());
        let barrier = Barrier::new(4);

        thread::scope(|s| {
            for worker in 0..4 {
                let manager = &manager;
                let barrier = &barrier;
                s.spawn(move || {
                    let topic = Topic::new(format!("worker-{worker}"));
                    let queues: Vec<_> = (0..10)
                        .map(|i| Arc::new(Queue::new(format!("w{worker}-q{i}"))))
                        .collect();
                    barrier.wait();
                    for queue in &queues {
                        manager.relate(&topic, queue);
                    }
                    // Keep the even-numbered queues
                    for queue in queues.iter().skip(1).step_by(2) {
                        manager.unrelate(&topic, queue);
                    }
                });
            }
        });

        for worker in 0..4 {
            let topic = Topic::new(format!("worker-{worker}"));
            assert_eq!(manager.related_queues(&topic).len(), 5);
        }
        assert_eq!(manager.relation_count(), 20);
    }

    #[test]
    #[serial]
    fn test_high_data_flow_single_producer_multiple_consumers() {
        let manager = QueueManager::<i32>::instance();
        manager.flush();

        let topic = Topic::new("topic1");
        let queue = Arc::new(Queue::default());
        manager.relate(&topic, &queue);

        let mut producer = Producer::<i32>::new();
        producer.subscribe(topic.clone());
        let consumers: Vec<Consumer<i32>> = (0..3)
            .map(|_| {
                let mut consumer = Consumer::new();
                consumer.subscribe(topic.clone());
                consumer
            })
            .collect();

        const DATA_FLOW: i32 = 10_000;
        let mut expected: i64 = 0;
        for i in 0..DATA_FLOW {
            assert_eq!(producer.publish(&topic, IntMessage::new(i)), 1);
            expected += i64::from(i);
        }

        let shares = [
            DATA_FLOW - (DATA_FLOW / 3) * 2,
            DATA_FLOW / 3,
            DATA_FLOW / 3,
        ];
        assert_eq!(shares, [3334, 3333, 3333]);

        let total: i64 = thread::scope(|s| {
            let workers: Vec<_> = consumers
                .iter()
                .zip(shares)
                .map(|(consumer, share)| {
                    let topic = &topic;
                    s.spawn(move || {
                        let mut sum: i64 = 0;
                        for _ in 0..share {
                            let fetched = consumer.fetch(topic);
                            assert_eq!(fetched.len(), 1);
                            sum += i64::from(*fetched[0].content());
                        }
                        sum
                    })
                })
                .collect();
            workers.into_iter().map(|w| w.join().unwrap()).sum()
        });

        assert_eq!(expected, 49_995_000);
        assert_eq!(total, expected);
        assert!(queue.is_empty());
        manager.unrelate(&topic, &queue);
    }

    #[test]
    fn test_consumers_blocked_before_publish_all_receive() {
        let manager = Arc::new(QueueManager::<u64>::new());
        let topic = Topic::new("late-publish");
        let queue = Arc::new(Queue::new("late"));
        manager.relate(&topic, &queue);

        let producer = Producer::with_manager(Arc::clone(&manager));
        let consumer = Consumer::with_manager(Arc::clone(&manager));

        let total: u64 = thread::scope(|s| {
            let fetchers: Vec<_> = (0..4)
                .map(|_| {
                    s.spawn(|| {
                        (0..50)
                            .map(|_| consumer.fetch(&topic)[0].clone().into_content())
                            .sum::<u64>()
                    })
                })
                .collect();

            for i in 0..200u64 {
                producer.publish(&topic, i.into());
            }

            fetchers.into_iter().map(|f| f.join().unwrap()).sum()
        });

        assert_eq!(total, 199 * 200 / 2);
    }

    #[test]
    fn test_concurrent_publishers_fan_out() {
        let manager = Arc::new(QueueManager::<u32>::new());
        let topic = Topic::new("fan-out");
        let left = Arc::new(Queue::new("left"));
        let right = Arc::new(Queue::new("right"));
        manager.relate(&topic, &left);
        manager.relate(&topic, &right);

        thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    let producer = Producer::with_manager(Arc::clone(&manager));
                    for i in 0..250u32 {
                        assert_eq!(producer.publish(&topic, i.into()), 2);
                    }
                });
            }
        });

        // Every publish landed once in each related queue
        assert_eq!(left.len(), 1000);
        assert_eq!(right.len(), 1000);
    }
}
