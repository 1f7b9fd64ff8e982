use prefix_store::PrefixStore;

mod common {
    use std::io::Write;

    pub fn init() {
        let _ = env_logger::builder()
            .format(|buf, record| writeln!(buf, "{}", record.args()))
            .is_test(true)
            .try_init();
    }
}

#[test]
fn test_easy() {
    common::init();
    let mut store = PrefixStore::new();
    store.add("85.0.0.0", 8, 0).unwrap();

    assert!(store.is_in("85.0.0.1").unwrap());
    let n = store.get_net("85.0.0.1").unwrap();
    assert!(n.found);
    assert_eq!(n.flags, 0);
    assert_eq!(n.network.as_deref(), Some("85.0.0.0/24"));
    assert_eq!(n.real_ip, "85.0.0.1");

    assert!(!store.is_in("85.0.1.0").unwrap());
    let n = store.get_net("85.0.1.0").unwrap();
    assert!(!n.found);
    assert_eq!(n.flags, 0);
    assert_eq!(n.network, None);
    assert_eq!(n.real_ip, "85.0.1.0");
}

#[test]
fn test_flags() {
    common::init();
    let mut store = PrefixStore::new();
    store.add("85.0.0.0", 8, 1).unwrap();

    let n = store.get_net("85.0.0.1").unwrap();
    assert!(n.found);
    assert_eq!(n.flags, 1);
    assert_eq!(n.network.as_deref(), Some("85.0.0.0/24"));

    let n = store.get_net("85.0.1.0").unwrap();
    assert!(!n.found);
    assert_eq!(n.flags, 0);
}

#[test]
fn is_in_matches_get_net_found_for_any_result() {
    common::init();
    let mut store = PrefixStore::new();
    store.add("10.0.0.0", 16, 0).unwrap();
    for addr in ["10.0.5.5", "10.1.0.1", "172.16.0.1"] {
        assert_eq!(store.is_in(addr).unwrap(), store.get_net(addr).unwrap().found);
    }
}

#[test]
fn malformed_address_is_rejected() {
    common::init();
    let mut store = PrefixStore::new();
    assert!(store.add("not-an-address", 8, 0).is_err());
    assert!(store.get_net("also-not-one").is_err());
}
