use super::*;

fn sample() -> FileMetadataRecord {
    let t = Some(FileTime::from_ticks(metacache_core::UNIX_EPOCH_TICKS));
    let mut rec = FileMetadataRecord::with_times(
        "/docs/report.txt",
        42,
        FileAttributes::ARCHIVE,
        0x1A2B_3C4D,
        t,
        t,
        t,
    )
    .unwrap();
    rec.set_size(300);
    rec
}

#[test]
fn attribute_names_lists_known_flags() {
    let cases: &[(FileAttributes, &[&str])] = &[
        (FileAttributes::empty(), &[]),
        (FileAttributes::ARCHIVE, &["ARCHIVE"]),
        (
            FileAttributes::DIRECTORY | FileAttributes::HIDDEN,
            &["HIDDEN", "DIRECTORY"],
        ),
    ];

    for (attrs, expected) in cases {
        assert_eq!(attribute_names(*attrs), *expected, "{attrs:?}");
    }
}

#[test]
fn human_record_output() {
    let mut printer = HumanPrinter::new(Vec::new());
    printer.print_record(&sample()).unwrap();
    let text = String::from_utf8(printer.into_inner()).unwrap();

    assert!(text.contains("path:           /docs/report.txt"), "{text}");
    assert!(text.contains("size:           300 (high 0x0, low 0x12c)"), "{text}");
    assert!(text.contains("attributes:     0x20 [ARCHIVE]"), "{text}");
    assert!(text.contains("written:        1970-01-01T00:00:00Z"), "{text}");
    assert!(text.contains("volume serial:  0x1a2b3c4d"), "{text}");
}

#[test]
fn human_records_are_separated_by_blank_line() {
    let mut printer = HumanPrinter::new(Vec::new());
    printer.print_record(&sample()).unwrap();
    printer.print_record(&sample()).unwrap();
    let text = String::from_utf8(printer.into_inner()).unwrap();

    assert_eq!(text.matches("\n\npath:").count(), 1);
}

#[test]
fn reparse_tag_is_named() {
    let mut rec = sample();
    rec.set_attributes(FileAttributes::REPARSE_POINT);
    rec.set_reserved0(reparse_tag::SYMLINK);

    let mut printer = HumanPrinter::new(Vec::new());
    printer.print_record(&rec).unwrap();
    let text = String::from_utf8(printer.into_inner()).unwrap();
    assert!(text.contains("(reparse tag symlink)"), "{text}");

    let view = RecordView::from(&rec);
    assert_eq!(view.reparse_tag.as_deref(), Some("symlink"));
}

#[test]
fn json_record_is_one_line_per_record() {
    let mut printer = JsonPrinter::new(Vec::new());
    printer.print_record(&sample()).unwrap();
    printer.print_row(&sample()).unwrap();
    let text = String::from_utf8(printer.into_inner()).unwrap();

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);

    let v: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(v["path"], "/docs/report.txt");
    assert_eq!(v["index"], 42);
    assert_eq!(v["size_low"], 300);
    assert_eq!(v["number_of_links"], 1);
    assert_eq!(v["volume_serial_number"], 0x1A2B_3C4D);
    assert_eq!(v["attribute_names"][0], "ARCHIVE");
    assert_eq!(v["creation_time"]["utc"], "1970-01-01T00:00:00Z");
    assert!(v.get("reparse_tag").is_none());
}

#[test]
fn json_find_data_has_empty_alternate_name() {
    let mut printer = JsonPrinter::new(Vec::new());
    printer.print_find_data(&sample().to_find_data()).unwrap();
    let text = String::from_utf8(printer.into_inner()).unwrap();

    let v: serde_json::Value = serde_json::from_str(text.trim()).unwrap();
    assert_eq!(v["file_name"], "docs/report.txt");
    assert_eq!(v["alternate_file_name"], "");
    assert_eq!(v["file_size_low"], 300);
}
