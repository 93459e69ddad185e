use branchdiff_core::DiffEntry;

use crate::report::ClassificationReport;

/// Classify diff entries into a [`ClassificationReport`].
///
/// Single pass in input order; every entry is classified on its own, nothing
/// is skipped or deduplicated. The `only_*` flags start out `true` and are
/// AND-ed with each entry, so an empty input leaves all four set.
///
/// # Examples
///
/// ```
/// use branchdiff_classify::classify;
/// use branchdiff_core::DiffEntry;
///
/// let report = classify(&[DiffEntry::changed("a.txt")]);
/// assert_eq!(report.changed_files, vec!["a.txt"]);
/// assert!(report.only_changed);
/// assert!(!report.only_added);
///
/// let empty = classify(&[]);
/// assert!(empty.only_added && empty.only_deleted);
/// ```
pub fn classify(entries: &[DiffEntry]) -> ClassificationReport {
    let mut report = ClassificationReport {
        all_files: Vec::with_capacity(entries.len()),
        added_and_changed_files: Vec::new(),
        added_files: Vec::new(),
        changed_files: Vec::new(),
        deleted_files: Vec::new(),
        renamed_files: Vec::new(),
        any_added: false,
        any_changed: false,
        any_deleted: false,
        any_renamed: false,
        only_added: true,
        only_changed: true,
        only_deleted: true,
        only_renamed: true,
        type_changed_files: Vec::new(),
    };

    for entry in entries {
        let changed = entry.is_changed();
        let path = &entry.new_path;

        report.all_files.push(path.clone());

        if changed || entry.is_new {
            report.added_and_changed_files.push(path.clone());
        }
        if entry.is_new {
            report.added_files.push(path.clone());
        }
        if changed {
            report.changed_files.push(path.clone());
        }
        if entry.is_deleted {
            report.deleted_files.push(path.clone());
        }
        if entry.is_renamed {
            report.renamed_files.push(path.clone());
        }

        report.any_added |= entry.is_new;
        report.any_changed |= changed;
        report.any_deleted |= entry.is_deleted;
        report.any_renamed |= entry.is_renamed;

        report.only_added &= entry.is_new;
        report.only_changed &= changed;
        report.only_deleted &= entry.is_deleted;
        report.only_renamed &= entry.is_renamed;

        // Purely a suffix comparison; independent of the flags above.
        if file_extension(&entry.old_path) != file_extension(&entry.new_path) {
            report.type_changed_files.push(path.clone());
        }
    }

    report
}

/// Extension of the final path segment, including the leading dot.
///
/// Returns the suffix starting at the last `.` after the last `/`, or an
/// empty string when the final segment has no dot.
///
/// # Examples
///
/// ```
/// use branchdiff_classify::file_extension;
///
/// assert_eq!(file_extension("src/main.rs"), ".rs");
/// assert_eq!(file_extension("archive.tar.gz"), ".gz");
/// assert_eq!(file_extension("dir.d/Makefile"), "");
/// assert_eq!(file_extension(".bashrc"), ".bashrc");
/// ```
pub fn file_extension(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rfind('.') {
        Some(idx) => &name[idx..],
        None => "",
    }
}
