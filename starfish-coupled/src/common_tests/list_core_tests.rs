use std::sync::Arc;
use std::thread;

use crate::data_structures::CoupledList;

/// An empty list finds nothing and visits nothing
pub fn test_empty_list(list: &CoupledList<i32>) {
    assert!(list.is_empty());
    assert_eq!(list.len(), 0);
    assert_eq!(list.find_first_if(|_| true), None);

    let mut visits = 0;
    list.for_each(|_| visits += 1);
    assert_eq!(visits, 0);

    assert_eq!(list.remove_if(|_| true), 0);
    assert!(list.to_vec().is_empty());
}

/// Elements come back newest first
pub fn test_push_front_order(list: &CoupledList<i32>) {
    list.push_front(1);
    list.push_front(2);
    list.push_front(3);

    assert_eq!(list.to_vec(), vec![3, 2, 1]);
    assert_eq!(list.len(), 3);
    assert!(!list.is_empty());
}

/// Test find_first_if returns the first match front to back
pub fn test_find_first_if(list: &CoupledList<i32>) {
    for v in [5, 10, 15, 20] {
        list.push_front(v);
    }

    // Front to back: 20, 15, 10, 5
    assert_eq!(list.find_first_if(|v| v % 2 == 1), Some(15));
    assert_eq!(list.find_first_if(|v| *v < 12), Some(10));
    assert_eq!(list.find_first_if(|v| *v > 100), None);

    assert!(list.contains(&5));
    assert!(!list.contains(&6));
}

/// Test removal in the middle, at the ends, and of missing values
pub fn test_remove_if(list: &CoupledList<i32>) {
    list.push_front(1);
    list.push_front(2);
    list.push_front(3);

    assert_eq!(list.remove_if(|v| *v == 2), 1);
    assert_eq!(list.to_vec(), vec![3, 1]);

    // Missing value is a no-op
    assert_eq!(list.remove_if(|v| *v == 42), 0);
    assert_eq!(list.to_vec(), vec![3, 1]);

    // Front
    assert_eq!(list.remove_if(|v| *v == 3), 1);
    assert_eq!(list.to_vec(), vec![1]);

    // Last remaining element
    assert_eq!(list.remove_if(|v| *v == 1), 1);
    assert!(list.is_empty());

    // The list keeps working after being emptied
    list.push_front(7);
    assert_eq!(list.to_vec(), vec![7]);
}

/// Found values are snapshots that survive removal of their node
pub fn test_found_value_outlives_node() {
    let list = CoupledList::new();
    list.push_front(Arc::new(String::from("alpha")));
    list.push_front(Arc::new(String::from("beta")));

    let found = list.find_first_if(|s| s.as_str() == "alpha").unwrap();
    assert_eq!(list.remove_if(|s| s.as_str() == "alpha"), 1);

    assert_eq!(found.as_str(), "alpha");
    assert_eq!(Arc::strong_count(&found), 1);
}

/// Test mutable traversal
pub fn test_for_each_mut(list: &CoupledList<i32>) {
    for v in 1..=4 {
        list.push_front(v);
    }

    list.for_each_mut(|v| *v *= 10);
    assert_eq!(list.to_vec(), vec![40, 30, 20, 10]);

    let mut sum = 0;
    list.for_each(|v| sum += v);
    assert_eq!(sum, 100);
}

/// Test clear under shared access
pub fn test_clear(list: &CoupledList<i32>) {
    for v in 0..100 {
        list.push_front(v);
    }

    assert_eq!(list.clear(), 100);
    assert!(list.is_empty());
    assert_eq!(list.clear(), 0);
}

/// N threads pushing distinct values lose and duplicate nothing
pub fn test_concurrent_push_front(num_threads: usize, items_per_thread: usize) {
    let list = Arc::new(CoupledList::new());

    let handles: Vec<_> = (0..num_threads)
        .map(|thread_id| {
            let list = Arc::clone(&list);
            thread::spawn(move || {
                for i in 0..items_per_thread {
                    list.push_front(thread_id * items_per_thread + i);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let mut elements = list.to_vec();
    assert_eq!(elements.len(), num_threads * items_per_thread);

    // Each thread's pushes keep their relative order (newest first).
    for thread_id in 0..num_threads {
        let mine: Vec<_> = elements
            .iter()
            .copied()
            .filter(|v| v / items_per_thread == thread_id)
            .collect();
        let expected: Vec<_> = (0..items_per_thread)
            .rev()
            .map(|i| thread_id * items_per_thread + i)
            .collect();
        assert_eq!(mine, expected, "order broken for thread {}", thread_id);
    }

    elements.sort_unstable();
    let expected: Vec<_> = (0..num_threads * items_per_thread).collect();
    assert_eq!(elements, expected);
}

/// Teardown of a very long chain neither recurses nor overflows the stack
pub fn test_teardown_long_chain(length: usize) {
    let list = CoupledList::new();
    for v in 0..length {
        list.push_front(v);
    }

    assert_eq!(list.find_first_if(|v| *v == 0), Some(0));
    drop(list);
}

/// `clear` tears a long chain down through the locked removal path
pub fn test_clear_long_chain(length: usize) {
    let list = CoupledList::new();
    for v in 0..length {
        list.push_front(v as u32);
    }

    assert_eq!(list.clear(), length);
    assert!(list.is_empty());
}
