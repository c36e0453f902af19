use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use fermata::{Dispatcher, Event, MessageKind, sans::state::StateKind};

/// Subscribe to events, collecting them in order.
fn collect(dispatcher: &Dispatcher, filter: Option<MessageKind>) -> Arc<Mutex<Vec<Event>>> {
    let events = Arc::new(Mutex::new(vec![]));
    let sink = Arc::clone(&events);
    dispatcher.subscribe(filter, move |e| sink.lock().unwrap().push(e.clone()));
    events
}

#[test]
fn publishes_after_returning_to_waiting() {
    let dispatcher = Dispatcher::new();
    let events = collect(&dispatcher, None);

    dispatcher.feed_all(&[0xF0, 0x77]);
    assert_eq!(dispatcher.state(), StateKind::I2cReply);

    dispatcher.feed_all(&[0x0A, 0x14]);
    assert_eq!(dispatcher.buffered(), vec![0x0A, 0x14]);
    assert!(events.lock().unwrap().is_empty());

    dispatcher.feed(0xF7);

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind(), MessageKind::I2cReply);
    assert_eq!(events[0].payload(), Some(&[0x0A, 0x14][..]));
    assert_eq!(dispatcher.state(), StateKind::Waiting);
    assert!(dispatcher.buffered().is_empty());
}

#[test]
fn publishes_in_frame_order() {
    let dispatcher = Dispatcher::new();
    let events = collect(&dispatcher, None);

    dispatcher.feed_all(&[0xF0, 0x77, 0x21, 0x22, 0xF7]);
    dispatcher.feed_all(&[0xF0, 0x77, 0x31, 0xF7]);

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].payload(), Some(&[0x21, 0x22][..]));
    assert_eq!(events[1].payload(), Some(&[0x31][..]));
}

#[test]
fn listener_sees_waiting_and_may_feed() {
    let dispatcher = Arc::new(Dispatcher::new());
    let seen = Arc::new(Mutex::new(vec![]));

    let weak = Arc::downgrade(&dispatcher);
    let sink = Arc::clone(&seen);
    dispatcher.subscribe(Some(MessageKind::I2cReply), move |_| {
        let dispatcher = weak.upgrade().unwrap();
        sink.lock().unwrap().push(dispatcher.state());

        // Start the next frame from within the callback.
        dispatcher.feed_all(&[0xF0, 0x77]);
    });

    dispatcher.feed_all(&[0xF0, 0x77, 0x01, 0xF7]);

    assert_eq!(*seen.lock().unwrap(), vec![StateKind::Waiting]);
    assert_eq!(dispatcher.state(), StateKind::I2cReply);
    assert!(dispatcher.buffered().is_empty());

    dispatcher.feed_all(&[0x02, 0xF7]);
    assert_eq!(seen.lock().unwrap().len(), 2);
}

#[test]
fn filters_by_kind() {
    let dispatcher = Dispatcher::new();
    let replies = collect(&dispatcher, Some(MessageKind::I2cReply));
    let all = collect(&dispatcher, None);

    dispatcher.feed_all(&[0xF9, 0x02, 0x05]);
    dispatcher.feed_all(&[0xF0, 0x77, 0x01, 0xF7]);
    dispatcher.feed_all(&[0x90, 0x01, 0x00]);

    assert_eq!(replies.lock().unwrap().len(), 1);
    assert_eq!(all.lock().unwrap().len(), 3);
}

#[test]
fn unsubscribe_stops_delivery() {
    let dispatcher = Dispatcher::new();
    let count = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&count);
    let id = dispatcher.subscribe(None, move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    dispatcher.feed_all(&[0xF0, 0x77, 0xF7]);
    assert!(dispatcher.unsubscribe(id));
    assert!(!dispatcher.unsubscribe(id));
    dispatcher.feed_all(&[0xF0, 0x77, 0xF7]);

    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn subscribing_during_publish_takes_effect_next_time() {
    let dispatcher = Arc::new(Dispatcher::new());
    let late = Arc::new(Mutex::new(vec![]));
    let subscribed = Arc::new(AtomicBool::new(false));

    let weak = Arc::downgrade(&dispatcher);
    let sink = Arc::clone(&late);
    dispatcher.subscribe(None, move |_| {
        if subscribed.swap(true, Ordering::SeqCst) {
            return;
        }

        let sink = Arc::clone(&sink);
        weak.upgrade()
            .unwrap()
            .subscribe(None, move |e| sink.lock().unwrap().push(e.clone()));
    });

    dispatcher.feed_all(&[0xF0, 0x77, 0x01, 0xF7]);
    assert!(late.lock().unwrap().is_empty());

    dispatcher.feed_all(&[0xF0, 0x77, 0x02, 0xF7]);
    let late = late.lock().unwrap();
    assert_eq!(late.len(), 1);
    assert_eq!(late[0].payload(), Some(&[0x02][..]));
}

#[test]
fn subscribes_from_another_thread() {
    let dispatcher = Dispatcher::new();
    let events = collect(&dispatcher, Some(MessageKind::I2cReply));

    std::thread::scope(|s| {
        s.spawn(|| {
            for _ in 0..100 {
                let id = dispatcher.subscribe(None, |_| {});
                dispatcher.unsubscribe(id);
            }
        });

        for i in 0..100 {
            dispatcher.feed_all(&[0xF0, 0x77, i, 0xF7]);
        }
    });

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 100);
    assert!(events.iter().enumerate().all(|(i, e)| e.payload() == Some(&[i as u8][..])));
    assert_eq!(dispatcher.state(), StateKind::Waiting);
}

#[test]
fn reset_drops_frame() {
    let dispatcher = Dispatcher::new();
    let events = collect(&dispatcher, None);

    dispatcher.feed_all(&[0xF0, 0x77, 0x01]);
    dispatcher.reset();
    dispatcher.feed(0xF7);

    assert!(events.lock().unwrap().is_empty());
    assert_eq!(dispatcher.state(), StateKind::Waiting);
}
