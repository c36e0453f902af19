use std::path::Path;

use csv::ReaderBuilder;
use fermata::{Event, Value, avec::FromEvents};

#[test]
fn decode_slice_startup() {
    const PATH: &str = "fixtures/startup.bin";
    let data = std::fs::read(PATH).unwrap();
    let mut validator = Validator::new(PATH);
    fermata::avec::decode_slice(&data, &mut validator).unwrap();
    validator.finish();
}

#[test]
fn decode_slice_noisy() {
    const PATH: &str = "fixtures/noisy.bin";
    let data = std::fs::read(PATH).unwrap();
    let mut validator = Validator::new(PATH);
    fermata::avec::decode_slice(&data, &mut validator).unwrap();
    validator.finish();
}

#[test]
fn decode_reader_startup() {
    const PATH: &str = "fixtures/startup.bin";
    let mut file = std::fs::File::open(PATH).unwrap();
    let mut validator = Validator::new(PATH);
    fermata::avec::decode_reader(&mut file, &mut validator).unwrap();
    validator.finish();
}

#[test]
fn decode_reader_noisy() {
    const PATH: &str = "fixtures/noisy.bin";
    let mut file = std::fs::File::open(PATH).unwrap();
    let mut validator = Validator::new(PATH);
    fermata::avec::decode_reader(&mut file, &mut validator).unwrap();
    validator.finish();
}

#[test]
fn decode_slice_truncated() {
    const PATH: &str = "fixtures/startup.bin";
    let data = std::fs::read(PATH).unwrap();
    let mut events: Vec<Event> = vec![];

    let err = fermata::avec::decode_slice(&data[..data.len() - 1], &mut events).unwrap_err();
    assert!(matches!(
        err,
        fermata::avec::slice::Error::Incomplete { buffered: 4, .. }
    ));
    assert_eq!(events.len(), 8);
}

struct Validator(Vec<Vec<String>>);

impl Validator {
    fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().with_extension("csv");

        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .has_headers(false)
            .from_path(path)
            .unwrap();

        let expected: Vec<Vec<String>> = reader
            .records()
            .map(|r| r.unwrap().iter().map(|f| f.to_string()).collect())
            .collect();

        Self(expected)
    }

    fn finish(&self) {
        assert!(self.0.is_empty(), "missing events: {:?}", self.0);
    }
}

impl FromEvents for Validator {
    fn add_event(&mut self, event: &Event) {
        assert!(!self.0.is_empty(), "unexpected event: {event:?}");

        let mut row = self.0.remove(0);
        assert_eq!(row.remove(0), format!("{:?}", event.kind()));

        for (key, value) in event.body() {
            assert_eq!(row.remove(0), format!("{key:?}"));
            assert_eq!(row.remove(0), render(value));
        }

        assert!(row.is_empty(), "unmatched fields: {row:?}");
    }
}

fn render(value: &Value) -> String {
    fn hex(bytes: &[u8]) -> String {
        bytes
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    match value {
        Value::Byte(b) => b.to_string(),
        Value::Bytes(bytes) => hex(bytes),
        Value::Groups(groups) => groups.iter().map(|g| hex(g)).collect::<Vec<_>>().join("|"),
        Value::State(state) => format!("{state:?}"),
        Value::Error(err) => format!("{err:?}"),
    }
}
