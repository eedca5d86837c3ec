//! End-to-end tests over real archives built with the codec crates.

use std::fs::File;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use rstest::rstest;
use zip::write::SimpleFileOptions;

use arcwalk_container::{detect_format, open_container, Archive, Container, Tar, Zip};

/// A member of a fixture archive: name plus contents (`None` = directory).
type Member<'a> = (&'a str, Option<&'a [u8]>);

fn write_tar<W: io::Write>(writer: W, members: &[Member<'_>]) {
    let mut builder = tar::Builder::new(writer);
    for (name, contents) in members {
        match contents {
            Some(data) => {
                let mut header = tar::Header::new_gnu();
                header.set_size(data.len() as u64);
                header.set_mode(0o644);
                header.set_cksum();
                builder.append_data(&mut header, name, *data).unwrap();
            }
            None => {
                let mut header = tar::Header::new_gnu();
                header.set_entry_type(tar::EntryType::dir());
                header.set_size(0);
                header.set_mode(0o755);
                header.set_cksum();
                builder.append_data(&mut header, name, io::empty()).unwrap();
            }
        }
    }
    builder.finish().unwrap();
}

fn make_tar(path: &Path, members: &[Member<'_>]) {
    write_tar(File::create(path).unwrap(), members);
}

fn make_tar_gz(path: &Path, members: &[Member<'_>]) {
    let encoder = GzEncoder::new(File::create(path).unwrap(), Compression::default());
    write_tar(encoder, members);
}

fn make_zip(path: &Path, members: &[Member<'_>]) {
    let mut writer = zip::ZipWriter::new(File::create(path).unwrap());
    let options = SimpleFileOptions::default();
    for (name, contents) in members {
        match contents {
            Some(data) => {
                writer.start_file(*name, options).unwrap();
                writer.write_all(data).unwrap();
            }
            None => {
                writer.add_directory(*name, options).unwrap();
            }
        }
    }
    writer.finish().unwrap();
}

fn browse_fixture() -> &'static [Member<'static>] {
    &[
        ("b/c.txt", Some(b"c contents")),
        ("b/d.txt", Some(b"d contents")),
        ("e", Some(b"e contents")),
    ]
}

#[test]
fn tar_navigation_follows_member_order() {
    let dir = tempfile::tempdir().unwrap();
    let archive_path = dir.path().join("fixture.tar");
    make_tar(&archive_path, browse_fixture());

    let tar = Tar::open(&archive_path).unwrap();
    let root = tar.archive_path().to_path_buf();

    assert_eq!(tar.listdir(&root).unwrap(), vec!["b", "e"]);
    assert_eq!(tar.listdir(&root.join("b")).unwrap(), vec!["c.txt", "d.txt"]);
    assert!(tar.isenterable(&root.join("b")).unwrap());
    assert!(!tar.isenterable(&root.join("b/c.txt")).unwrap());
    assert_eq!(
        tar.abspath(&root.join("b/c.txt")).unwrap(),
        root.join("b/c.txt")
    );
}

#[test]
fn tar_unknown_path_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let archive_path = dir.path().join("fixture.tar");
    make_tar(&archive_path, browse_fixture());

    let tar = Tar::open(&archive_path).unwrap();
    let root = tar.archive_path().to_path_buf();
    assert!(tar.listdir(&root.join("ghost")).is_err());
}

#[test]
fn zip_directory_markers_contribute_no_nodes() {
    let dir = tempfile::tempdir().unwrap();
    let archive_path = dir.path().join("fixture.zip");
    make_zip(
        &archive_path,
        &[
            ("dir/", None),
            ("dir/file.txt", Some(b"hello")),
            ("top.txt", Some(b"top")),
        ],
    );

    let zip = Zip::open(&archive_path).unwrap();
    let root = zip.archive_path().to_path_buf();

    assert_eq!(zip.listdir(&root).unwrap(), vec!["dir", "top.txt"]);
    assert_eq!(zip.listdir(&root.join("dir")).unwrap(), vec!["file.txt"]);
    assert!(zip.isenterable(&root.join("dir")).unwrap());
    assert!(!zip.isenterable(&root.join("top.txt")).unwrap());
}

#[test]
fn zip_selective_extraction_touches_only_selected_members() {
    let dir = tempfile::tempdir().unwrap();
    let archive_path = dir.path().join("fixture.zip");
    make_zip(
        &archive_path,
        &[
            ("dir/", None),
            ("dir/file.txt", Some(b"hello")),
            ("top.txt", Some(b"top")),
        ],
    );

    let zip = Zip::open(&archive_path).unwrap();
    let root = zip.archive_path().to_path_buf();
    let selected = zip.tree().get(&root.join("dir/file.txt")).unwrap().unwrap();

    let target = dir.path().join("out");
    zip.extract(&target, Some(&[selected])).unwrap();

    assert_eq!(
        std::fs::read(target.join("dir/file.txt")).unwrap(),
        b"hello"
    );
    assert!(!target.join("top.txt").exists());
}

#[test]
fn tar_selective_extraction_touches_only_selected_members() {
    let dir = tempfile::tempdir().unwrap();
    let archive_path = dir.path().join("fixture.tar");
    make_tar(&archive_path, browse_fixture());

    let tar = Tar::open(&archive_path).unwrap();
    let root = tar.archive_path().to_path_buf();
    let selected = tar.tree().get(&root.join("b/c.txt")).unwrap().unwrap();

    let target = dir.path().join("out");
    std::fs::create_dir(&target).unwrap();
    tar.extract(&target, Some(&[selected])).unwrap();

    assert_eq!(std::fs::read(target.join("b/c.txt")).unwrap(), b"c contents");
    assert!(!target.join("b/d.txt").exists());
    assert!(!target.join("e").exists());
}

#[test]
fn tar_full_extraction_unpacks_everything() {
    let dir = tempfile::tempdir().unwrap();
    let archive_path = dir.path().join("fixture.tar");
    make_tar(&archive_path, browse_fixture());

    let tar = Tar::open(&archive_path).unwrap();
    let target = dir.path().join("out");
    std::fs::create_dir(&target).unwrap();
    tar.extract(&target, None).unwrap();

    assert!(target.join("b/c.txt").exists());
    assert!(target.join("b/d.txt").exists());
    assert!(target.join("e").exists());
}

#[test]
fn gzipped_tar_is_browsed_transparently() {
    let dir = tempfile::tempdir().unwrap();
    let archive_path = dir.path().join("fixture.tar.gz");
    make_tar_gz(&archive_path, browse_fixture());

    assert!(Tar::is_tar(&archive_path));
    let tar = Tar::open(&archive_path).unwrap();
    let root = tar.archive_path().to_path_buf();
    assert_eq!(tar.listdir(&root).unwrap(), vec!["b", "e"]);
}

#[test]
fn explicit_directory_members_are_promoted_to_directories() {
    // tar archives commonly list "dir/" before "dir/file.txt"
    let dir = tempfile::tempdir().unwrap();
    let archive_path = dir.path().join("fixture.tar");
    make_tar(
        &archive_path,
        &[("sub/", None), ("sub/inner.txt", Some(b"x"))],
    );

    let tar = Tar::open(&archive_path).unwrap();
    let root = tar.archive_path().to_path_buf();
    assert_eq!(tar.listdir(&root).unwrap(), vec!["sub"]);
    assert_eq!(tar.listdir(&root.join("sub")).unwrap(), vec!["inner.txt"]);
}

#[rstest]
#[case::tar("fixture.tar", "tar")]
#[case::tar_gz("fixture.tar.gz", "tar")]
#[case::zip("fixture.zip", "zip")]
fn factory_detects_and_opens(#[case] file_name: &str, #[case] backend: &str) {
    let dir = tempfile::tempdir().unwrap();
    let archive_path = dir.path().join(file_name);
    match backend {
        "tar" if file_name.ends_with(".gz") => make_tar_gz(&archive_path, browse_fixture()),
        "tar" => make_tar(&archive_path, browse_fixture()),
        _ => make_zip(&archive_path, &[("top.txt", Some(b"top"))]),
    }

    let descriptor = detect_format(&archive_path).unwrap();
    assert_eq!(descriptor.name, backend);

    let container = open_container(&archive_path).unwrap().unwrap();
    let root = container.archive_path().to_path_buf();
    assert!(!container.listdir(&root).unwrap().is_empty());
}

#[test]
fn factory_passes_on_plain_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "just text, long enough to not be ambiguous").unwrap();

    assert!(open_container(&path).unwrap().is_none());
}

#[test]
fn archive_roots_are_absolute() {
    let dir = tempfile::tempdir().unwrap();
    let archive_path = dir.path().join("fixture.tar");
    make_tar(&archive_path, browse_fixture());

    let tar = Tar::open(&archive_path).unwrap();
    assert!(tar.archive_path().is_absolute());
    assert_eq!(
        tar.tree().root_dir(),
        PathBuf::from(std::path::absolute(&archive_path).unwrap())
    );
}
