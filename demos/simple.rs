use shifttable::{BytesEq, Counters, Djb1Hash, ShiftTable, TableConfig};

fn main() -> Result<(), shifttable::Error> {
    let config = TableConfig::new().initial_capacity(8);
    let mut table = ShiftTable::with_observer(Djb1Hash, BytesEq, config, Counters::new())?;

    let entries = [
        ("one", "1"),
        ("two", "2"),
        ("three", "3"),
        ("four", "4"),
        ("five", "5"),
        ("six", "6"),
        ("seven", "7"),
    ];

    for (key, value) in entries {
        table.put(key.as_bytes(), value.as_bytes())?;
    }

    table.put(b"two", b"deux")?;
    assert!(table.delete(b"three"));

    if let Some(item) = table.get(b"two") {
        println!("two => {}", String::from_utf8_lossy(item.value()));
    }

    for (idx, item) in &table {
        println!(
            "slot {idx}: {} = {}",
            String::from_utf8_lossy(item.key()),
            String::from_utf8_lossy(item.value())
        );
    }

    let counters = table.observer();
    println!(
        "len={} capacity={} collisions={} probes={} shifts={} grows={}",
        table.len(),
        table.capacity(),
        counters.collisions(),
        counters.probes(),
        counters.shifts(),
        counters.grows()
    );

    Ok(())
}
