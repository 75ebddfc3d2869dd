//! Property tests over arbitrary marshals.

use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use marshal::escape::{escape, find_separator, unescape};
use marshal::{ByteView, Marshal, Value};
use proptest::prelude::*;

fn value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        any::<u8>().prop_map(Value::Byte),
        prop::collection::vec(any::<u8>(), 1..16).prop_map(Value::from),
        any::<f64>().prop_map(Value::Double),
        any::<i32>().prop_map(Value::Integer),
        any::<i64>().prop_map(Value::Long),
        // "\0" shares its encoding with ""
        any::<String>()
            .prop_filter("aliases the empty string", |s| s != "\0")
            .prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 32, 4, |inner| {
        prop::collection::vec(inner, 0..4)
            .prop_map(|values| Value::Marshal(values.into_iter().collect()))
    })
}

fn marshal() -> impl Strategy<Value = Marshal> {
    prop::collection::vec(value(), 0..6).prop_map(|values| values.into_iter().collect())
}

fn std_hash<T: Hash>(t: &T) -> u64 {
    let mut h = DefaultHasher::new();
    t.hash(&mut h);
    h.finish()
}

proptest! {
    #[test]
    fn unescape_inverts_escape(bytes in prop::collection::vec(any::<u8>(), 0..64), esc in any::<u8>()) {
        let view = ByteView::from(bytes.clone());
        let escaped = escape(&view, esc);
        prop_assert_eq!(escaped.len(), bytes.len() + bytes.iter().filter(|&&b| b == esc).count());
        prop_assert_eq!(find_separator(escaped.as_slice(), esc), escaped.len());
        prop_assert_eq!(unescape(&escaped, esc).to_vec(), bytes);
    }

    #[test]
    fn comparable_round_trip(m in marshal()) {
        let bytes = m.to_comparable_bytes();
        let decoded = Marshal::from_comparable_bytes(bytes.clone()).unwrap();
        prop_assert_eq!(&decoded, &m);
        prop_assert_eq!(decoded.to_comparable_bytes(), bytes);
    }

    #[test]
    fn stream_round_trip(m in marshal()) {
        let bytes = m.to_stream_bytes().unwrap();
        prop_assert_eq!(Marshal::from_stream_bytes(&bytes).unwrap(), m);
    }

    #[test]
    fn order_matches_bytes(a in marshal(), b in marshal()) {
        prop_assert_eq!(a.cmp(&b), a.to_comparable_bytes().cmp(&b.to_comparable_bytes()));
        prop_assert_eq!(a == b, a.cmp(&b) == Ordering::Equal);
    }

    #[test]
    fn non_negative_integers_sort(a in 0..=i32::MAX, b in 0..=i32::MAX) {
        let ma = Marshal::builder().add_integer(a).build();
        let mb = Marshal::builder().add_integer(b).build();
        prop_assert_eq!(ma.cmp(&mb), a.cmp(&b));
    }

    #[test]
    fn non_negative_longs_sort(a in 0..=i64::MAX, b in 0..=i64::MAX) {
        let ma = Marshal::builder().add_long(a).add_string("tail").build();
        let mb = Marshal::builder().add_long(b).add_string("tail").build();
        prop_assert_eq!(ma.cmp(&mb), a.cmp(&b));
    }

    #[test]
    fn strings_sort_unless_prefixed(a in "[a-z]{1,6}", b in "[a-z]{1,6}") {
        prop_assume!(!a.starts_with(&b) && !b.starts_with(&a));
        let ma = Marshal::builder().add_string(a.clone()).add_integer(1).build();
        let mb = Marshal::builder().add_string(b.clone()).add_integer(0).build();
        prop_assert_eq!(ma.cmp(&mb), a.cmp(&b));
    }

    #[test]
    fn prefixes_prefix_the_full_form(m in marshal()) {
        let full = m.to_bytes();
        for n in 0..=m.len() {
            let loose = m.prefix_unterminated_bytes(n).unwrap();
            let exact = m.prefix_terminated_bytes(n).unwrap();
            prop_assert!(full.starts_with(&loose));
            prop_assert!(full.starts_with(&exact));
            if n > 0 {
                prop_assert_eq!(Marshal::from_comparable_bytes(exact).unwrap(), m.to_index(n).unwrap());
            }
        }
    }

    #[test]
    fn hashes_survive_round_trip(m in marshal()) {
        let decoded = Marshal::from_comparable_bytes(m.to_bytes()).unwrap();
        prop_assert_eq!(std_hash(&decoded), std_hash(&m));
        prop_assert_eq!(decoded.stable_hash(), m.stable_hash());
    }
}
