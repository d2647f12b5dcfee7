use super::*;
use std::fs::{create_dir, write};

#[test]
fn regular_file_is_observed() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let file_path = tmp.path().join("file.txt");
    write(&file_path, b"hello world").expect("write file");

    let rec = observe_path(&file_path, Some(0x1A2B_3C4D)).expect("observe");

    assert_eq!(rec.path(), file_path.to_str().unwrap());
    assert_eq!(rec.size(), 11);
    assert_eq!(rec.volume_serial_number(), 0x1A2B_3C4D);
    assert!(rec.number_of_links() >= 1);
    assert!(!rec.is_directory());
    assert_eq!(rec.reparse_tag(), None);

    let modified = fs::metadata(&file_path).unwrap().modified().unwrap();
    assert_eq!(rec.last_write_time(), FileTime::from(modified));
}

#[test]
fn directory_has_zero_size_and_directory_bit() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let dir = tmp.path().join("sub");
    create_dir(&dir).expect("mkdir");

    let rec = observe_path(&dir, Some(1)).expect("observe");
    assert!(rec.is_directory());
    assert_eq!(rec.size(), 0);
}

#[test]
fn missing_path_is_an_io_error() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let err = observe_path(&tmp.path().join("nope"), None).unwrap_err();
    assert!(matches!(err, Error::Io(_)), "got {err:?}");
    assert!(!err.is_corruption());
}

#[test]
fn observed_record_survives_codec_round_trip() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let file_path = tmp.path().join("data.bin");
    write(&file_path, vec![7u8; 4096]).expect("write file");

    let rec = observe_path(&file_path, None).expect("observe");
    let back = crate::codec::decode(rec.path(), &crate::codec::encode(&rec)).unwrap();
    assert_eq!(back, rec);
}

#[cfg(unix)]
mod unix {
    use super::*;
    use std::os::unix::fs::{MetadataExt, symlink};

    #[test]
    fn inode_and_links_come_from_metadata() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let file_path = tmp.path().join("a.txt");
        write(&file_path, b"x").unwrap();
        fs::hard_link(&file_path, tmp.path().join("b.txt")).unwrap();

        let md = fs::metadata(&file_path).unwrap();
        let rec = observe_path(&file_path, None).unwrap();

        assert_eq!(rec.index(), md.ino());
        assert_eq!(rec.number_of_links(), 2);
        assert_eq!(rec.volume_serial_number(), md.dev() as u32);
        assert!(rec.attributes().contains(FileAttributes::ARCHIVE));
    }

    #[test]
    fn symlink_is_a_reparse_point() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let target = tmp.path().join("target");
        write(&target, b"x").unwrap();
        let link = tmp.path().join("link");
        symlink(&target, &link).unwrap();

        let rec = observe_path(&link, None).unwrap();
        assert!(rec.attributes().contains(FileAttributes::REPARSE_POINT));
        assert_eq!(rec.reparse_tag(), Some(reparse_tag::SYMLINK));
    }

    #[test]
    fn dot_files_are_hidden() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let cases: &[(&str, bool)] = &[(".env", true), ("visible", false), ("a.b", false)];

        for (name, hidden) in cases {
            let p = tmp.path().join(name);
            write(&p, b"").unwrap();
            let rec = observe_path(&p, None).unwrap();
            assert_eq!(
                rec.attributes().contains(FileAttributes::HIDDEN),
                *hidden,
                "{name}"
            );
        }
    }
}
