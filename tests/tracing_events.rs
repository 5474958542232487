use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use ctrlmsg::{Codec, FieldMap, IdAllocator, Registry, TypeId};
use tracing::Level;

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SharedBuf {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

fn capture(level: Level, f: impl FnOnce()) -> String {
    let buf = SharedBuf::default();
    let writer = buf.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, f);
    buf.contents()
}

#[test]
fn pack_and_unpack_are_traced_at_debug() {
    let registry = Registry::seeded();
    let ids = IdAllocator::new();
    let codec = Codec::new(&registry, &ids);

    let output = capture(Level::DEBUG, || {
        let packed = codec
            .pack("netif_be_connect_t", &FieldMap::new().with("domid", 2u32))
            .unwrap();
        codec.unpack("netif_be_connect_t", &packed.payload).unwrap();
    });

    assert!(output.contains("packed message"), "{output}");
    assert!(output.contains("type_name=\"netif_be_connect_t\""), "{output}");
    assert!(output.contains("unpacked message"), "{output}");
}

#[test]
fn nothing_is_written_above_debug() {
    let registry = Registry::seeded();
    let ids = IdAllocator::new();
    let codec = Codec::new(&registry, &ids);

    let output = capture(Level::INFO, || {
        codec.pack("shutdown_poweroff_t", &FieldMap::new()).unwrap();
    });

    assert!(output.is_empty(), "{output}");
}

#[test]
fn overwriting_merge_is_reported() {
    let output = capture(Level::DEBUG, || {
        let mut registry = Registry::new();
        registry.register(&[("probe_t", TypeId::new(8, 0))]);
        registry.register(&[("probe_t", TypeId::new(8, 1))]);
    });

    assert!(output.contains("overwriting message type"), "{output}");
}
