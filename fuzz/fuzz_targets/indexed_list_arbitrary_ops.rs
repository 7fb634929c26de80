#![no_main]

use libfuzzer_sys::fuzz_target;
use topnkit::ds::IndexedList;

// Fuzz arbitrary operation sequences on IndexedList
//
// Tests random sequences of push_back, push_front, insert_after, remove and
// pop_front against a Vec model.
fuzz_target!(|data: &[u8]| {
    let mut list: IndexedList<u8> = IndexedList::new();
    let mut model = Vec::new();

    let mut idx = 0;
    while idx + 1 < data.len() {
        let op = data[idx] % 5;
        let value = data[idx + 1];

        match op {
            0 => {
                let id = list.push_back(value);
                model.push((id, value));
            }
            1 => {
                let id = list.push_front(value);
                model.insert(0, (id, value));
            }
            2 => {
                if !model.is_empty() {
                    let pos = usize::from(value) % model.len();
                    let id = list.insert_after(model[pos].0, value);
                    model.insert(pos + 1, (id, value));
                }
            }
            3 => {
                if !model.is_empty() {
                    let pos = usize::from(value) % model.len();
                    let (id, expected) = model.remove(pos);
                    assert_eq!(list.remove(id), Some(expected));
                    assert!(!list.contains(id));
                }
            }
            4 => {
                let expected = if model.is_empty() {
                    None
                } else {
                    Some(model.remove(0).1)
                };
                assert_eq!(list.pop_front(), expected);
            }
            _ => unreachable!(),
        }

        assert_eq!(list.len(), model.len());
        assert!(list.iter().copied().eq(model.iter().map(|(_, v)| *v)));
        assert!(list.iter_rev().copied().eq(model.iter().rev().map(|(_, v)| *v)));
        idx += 2;
    }
});
