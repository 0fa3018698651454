use cipherbreak::dictionary::Dictionary;
use cipherbreak::error::CipherBreakError;
use std::io::Write;

#[test]
fn loads_words_from_file_uppercased() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "cat").unwrap();
    writeln!(file, "Dog").unwrap();
    writeln!(file).unwrap();
    writeln!(file, "  bird  ").unwrap();

    let dict = Dictionary::load_from_file(file.path()).unwrap();
    assert_eq!(dict.len(), 3);
    assert!(dict.contains("CAT"));
    assert!(dict.contains("DOG"));
    assert!(dict.contains("BIRD"));
}

#[test]
fn empty_file_yields_empty_dictionary() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let dict = Dictionary::load_from_file(file.path()).unwrap();
    assert!(dict.is_empty());
    assert_eq!(dict.match_count("ANY TEXT AT ALL"), 0);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("no_such_words.txt");
    match Dictionary::load_from_file(&missing) {
        Err(CipherBreakError::Io(e)) => {
            assert_eq!(e.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected a NotFound IO error, got {:?}", other.map(|d| d.len())),
    }
}
