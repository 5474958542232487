use std::sync::{Arc, Mutex};

use bytes::Bytes;
use ctrlmsg::protocol::types::{blkif_be, driver_status, interface_status, shutdown};
use ctrlmsg::{
    Codec, Error, FieldMap, FieldValue, IdAllocator, LoopbackBuilder, Message,
    MessageBuilder, MessageHeader, Payload, Registry, TypeId, WireFields, print_message,
};

const SEEDED: &[(&str, u8, u8)] = &[
    ("console_data", 0, 0),
    ("blkif_be_create_t", 1, 0),
    ("blkif_be_destroy_t", 1, 1),
    ("blkif_be_connect_t", 1, 2),
    ("blkif_be_disconnect_t", 1, 3),
    ("blkif_be_vbd_create_t", 1, 4),
    ("blkif_be_vbd_destroy_t", 1, 5),
    ("blkif_be_vbd_grow_t", 1, 6),
    ("blkif_be_vbd_shrink_t", 1, 7),
    ("blkif_be_driver_status_changed_t", 1, 32),
    ("blkif_fe_interface_status_changed_t", 2, 0),
    ("blkif_fe_driver_status_changed_t", 2, 32),
    ("blkif_fe_interface_connect_t", 2, 33),
    ("blkif_fe_interface_disconnect_t", 2, 34),
    ("netif_be_create_t", 3, 0),
    ("netif_be_destroy_t", 3, 1),
    ("netif_be_connect_t", 3, 2),
    ("netif_be_disconnect_t", 3, 3),
    ("netif_be_driver_status_changed_t", 3, 32),
    ("netif_fe_interface_status_changed_t", 4, 0),
    ("netif_fe_driver_status_changed_t", 4, 32),
    ("netif_fe_interface_connect_t", 4, 33),
    ("netif_fe_interface_disconnect_t", 4, 34),
    ("shutdown_poweroff_t", 6, 0),
    ("shutdown_reboot_t", 6, 1),
    ("shutdown_suspend_t", 6, 2),
];

/// Transport double that records every message it builds.
#[derive(Default)]
struct RecordingTransport {
    sent: Mutex<Vec<Message>>,
}

impl MessageBuilder for RecordingTransport {
    type Message = Message;

    fn build(&self, header: MessageHeader, payload: Payload) -> Message {
        let message = Message::new(header, payload);
        self.sent.lock().unwrap().push(message.clone());
        message
    }
}

#[test]
fn registry_resolves_every_seeded_name() {
    let registry = Registry::global();

    for &(name, major, minor) in SEEDED {
        assert_eq!(registry.lookup(name).unwrap(), TypeId::new(major, minor), "{name}");
        assert_eq!(registry.type_name(major, minor), Some(name));
    }
    assert_eq!(registry.len(), SEEDED.len());
}

#[test]
fn registry_rejects_unregistered_names() {
    let registry = Registry::global();

    for name in ["", "console", "blkif_be_vbd_create", "SHUTDOWN_REBOOT_T", "netif_fe_t"] {
        assert!(matches!(registry.lookup(name), Err(Error::UnknownType { .. })), "{name}");
    }
    assert_eq!(registry.type_name(99, 99), None);
}

#[test]
fn custom_registry_extends_seeded_tables() {
    let mut registry = Registry::seeded();
    registry.register(&[("usbif_be_create_t", TypeId::new(7, 0))]);
    let ids = IdAllocator::new();
    let codec = Codec::new(&registry, &ids);

    let packed = codec.pack("usbif_be_create_t", &FieldMap::new()).unwrap();

    assert_eq!(packed.header.type_id(), TypeId::new(7, 0));
    assert_eq!(registry.type_name(7, 0), Some("usbif_be_create_t"));
    assert!(Registry::global().lookup("usbif_be_create_t").is_err());
}

#[test]
fn each_pack_consumes_exactly_one_id() {
    let registry = Registry::seeded();
    let ids = IdAllocator::new();
    let codec = Codec::new(&registry, &ids);

    let first = codec.pack("shutdown_reboot_t", &FieldMap::new()).unwrap();
    let second = codec.pack_raw("console_data", &b"x"[..]).unwrap();
    let third = codec
        .pack(
            "blkif_fe_driver_status_changed_t",
            &FieldMap::new().with("status", driver_status::UP),
        )
        .unwrap();

    assert_eq!(first.header.type_id(), TypeId::new(6, shutdown::REBOOT));
    assert_eq!(
        [first.header.id(), second.header.id(), third.header.id()],
        [1, 2, 3]
    );
    assert_eq!(ids.peek(), 3);
}

#[test]
fn block_backend_exchange_over_recording_transport() {
    let registry = Registry::seeded();
    let ids = IdAllocator::new();
    let codec = Codec::new(&registry, &ids);
    let transport = RecordingTransport::default();

    let request = FieldMap::new()
        .with("domid", 3u32)
        .with("blkif_handle", 0u32)
        .with("vdevice", 0x0301u32)
        .with("mac", vec![1u64, 2, 3, 4, 5, 6]);
    let sent = codec
        .pack("blkif_be_vbd_create_t", &request)
        .unwrap()
        .build(&transport);

    assert_eq!(sent.header().type_id(), TypeId::new(1, blkif_be::VBD_CREATE));
    let Payload::Fields(wire) = sent.payload() else {
        panic!("expected field payload");
    };
    for (i, octet) in (1..=6).enumerate() {
        assert_eq!(wire.get(&format!("mac[{i}]")), Some(&octet));
    }
    assert!(!wire.contains_key("mac"));

    let recorded = transport.sent.lock().unwrap();
    assert_eq!(recorded.len(), 1);
    assert_eq!(codec.unpack_message(&recorded[0]).unwrap(), request);
}

#[test]
fn unpack_partial_mac_is_zero_filled() {
    let codec = Codec::global();
    let wire: WireFields = [("mac[0]".to_owned(), 1), ("mac[3]".to_owned(), 4)]
        .into_iter()
        .collect();

    let fields = codec
        .unpack("netif_fe_interface_status_changed_t", &Payload::Fields(wire))
        .unwrap();

    assert_eq!(fields.len(), 1);
    assert_eq!(fields.mac(), Some(&[1, 0, 0, 4, 0, 0][..]));
}

#[test]
fn unpack_raw_payload_regardless_of_type() {
    let codec = Codec::global();

    for name in ["console_data", "shutdown_poweroff_t", "no_such_type"] {
        let fields = codec
            .unpack(name, &Payload::Raw(Bytes::from_static(b"hello")))
            .unwrap();
        assert_eq!(
            fields.get("value"),
            Some(&FieldValue::Raw(Bytes::from_static(b"hello")))
        );
    }
}

#[test]
fn status_change_survives_loopback() {
    let registry = Registry::seeded();
    let ids = IdAllocator::new();
    let codec = Codec::new(&registry, &ids);
    let fields = FieldMap::new()
        .with("handle", 0u32)
        .with("status", interface_status::CONNECTED)
        .with("evtchn", 12u32)
        .with("mac", [0x00_u8, 0x16, 0x3e, 0x01, 0x02, 0x03]);

    let message = codec
        .pack("netif_fe_interface_status_changed_t", &fields)
        .unwrap()
        .build(&LoopbackBuilder);
    let (header, payload) = message.into_parts();
    let received = Message::new(header, payload);

    assert_eq!(received.header().type_id(), TypeId::new(4, 0));
    assert_eq!(codec.unpack_message(&received).unwrap(), fields);
}

#[test]
fn diagnostic_dump_of_unknown_message_does_not_fail() {
    let message = Message::new(
        MessageHeader::new(TypeId::new(42, 7), 1000),
        Payload::Fields(WireFields::new()),
    );
    let mut out = Vec::new();

    print_message(&message, &mut out, true).unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "message: type=(42:7) id=1000\npayload={}\n"
    );
}

#[test]
fn shared_allocator_across_threads() {
    let registry = Arc::new(Registry::seeded());
    let ids = Arc::new(IdAllocator::new());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&registry);
            let ids = Arc::clone(&ids);
            std::thread::spawn(move || {
                let codec = Codec::new(&registry, &ids);
                (0..250)
                    .map(|_| {
                        codec
                            .pack("shutdown_suspend_t", &FieldMap::new())
                            .unwrap()
                            .header
                            .id()
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut all: Vec<_> = handles
        .into_iter()
        .flat_map(|handle| handle.join().unwrap())
        .collect();
    all.sort_unstable();
    all.dedup();

    assert_eq!(all.len(), 1000);
    assert_eq!(all.first(), Some(&1));
    assert_eq!(all.last(), Some(&1000));
}
