#![no_main]

use std::io::{BufRead, Read, Write};

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use wideio::{
    ConsoleOptions,
    console::{ConsoleReader, ConsoleWriter, ScriptedConsole},
    narrow,
};

#[derive(Debug, Arbitrary)]
enum ReadOp {
    Read(u8),
    FillBuf,
    Consume(u8),
    Unread(u8),
}

#[derive(Debug, Arbitrary)]
struct Input {
    capacity: u8,
    strip_carriage_return: bool,
    ctrl_z_eof: bool,
    reads: Vec<Vec<u16>>,
    ops: Vec<ReadOp>,
    writes: Vec<Vec<u8>>,
    limits: Vec<u8>,
}

fuzz_target!(|input: Input| {
    let options = ConsoleOptions {
        buffer_capacity: usize::from(input.capacity),
        strip_carriage_return: input.strip_carriage_return,
        ctrl_z_eof: input.ctrl_z_eof,
    };

    // Reader: arbitrary input and interleavings never panic.
    let mut console = ScriptedConsole::new();
    for units in input.reads {
        console.push_read(units);
    }
    let mut reader = ConsoleReader::with_options(&mut console, options);
    for op in input.ops {
        match op {
            ReadOp::Read(n) => {
                let mut buf = vec![0; usize::from(n)];
                let _ = reader.read(&mut buf);
            }
            ReadOp::FillBuf => {
                let _ = reader.fill_buf();
            }
            ReadOp::Consume(n) => reader.consume(usize::from(n)),
            ReadOp::Unread(byte) => reader.unread(byte),
        }
    }
    let mut rest = Vec::new();
    let _ = reader.read_to_end(&mut rest);
    drop(reader);

    // Writer: whatever the split and acceptance pattern, the console
    // receives the lossy decoding of the concatenated bytes.
    let mut console = ScriptedConsole::new();
    for limit in input.limits {
        console.limit_next_write(usize::from(limit % 8) + 1);
    }
    let mut writer = ConsoleWriter::with_options(&mut console, options);
    let mut all = Vec::new();
    for chunk in &input.writes {
        writer.write_all(chunk).unwrap();
        all.extend_from_slice(chunk);
    }
    writer.finish().unwrap();
    drop(writer);
    assert_eq!(console.written_string(), narrow(&all));
});
