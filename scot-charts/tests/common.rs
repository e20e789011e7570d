use std::{fs, path::Path};

/// Write a results report the way the benchmark harness prints it: free text,
/// the element count, then the table terminated by a blank line.
pub fn write_report(dir: &Path, name: &str, header: &str, rows: &[&str]) {
    fs::create_dir_all(dir).unwrap();

    let mut contents = String::from("Running list benchmark\nNumber of elements: 1000\n\n");
    contents.push_str(header);
    contents.push('\n');
    for row in rows {
        contents.push_str(row);
        contents.push('\n');
    }
    contents.push_str("\nDone\n");

    fs::write(dir.join(name), contents).unwrap();
}
