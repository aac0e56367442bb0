//! The `studentbook update` command.

use std::path::Path;

use anyhow::Result;

use studentbook_core::RecordForm;

/// Fields given on the command line. `None` keeps the stored value.
#[derive(Debug, Default)]
pub struct Changes {
    pub name: Option<String>,
    pub c1: Option<String>,
    pub c2: Option<String>,
    pub c3: Option<String>,
    pub exam: Option<String>,
}

impl Changes {
    fn apply(self, form: &mut RecordForm) {
        let fields = [
            (self.name, &mut form.name),
            (self.c1, &mut form.c1),
            (self.c2, &mut form.c2),
            (self.c3, &mut form.c3),
            (self.exam, &mut form.exam),
        ];
        for (change, field) in fields {
            if let Some(value) = change {
                *field = value;
            }
        }
    }
}

pub fn execute(path: &Path, id: i64, changes: Changes) -> Result<()> {
    let mut store = super::open_store(path)?;

    // Pre-fill from the stored record, as an edit dialog would.
    let mut form = store
        .get(id)
        .map(RecordForm::from_record)
        .unwrap_or_default();
    changes.apply(&mut form);

    let updated = store.update_form(id, &form)?;
    println!(
        "Student {} ({}) updated successfully: {} / 160, {:.2}%, grade {}",
        updated.id,
        updated.name,
        updated.total(),
        updated.percentage(),
        updated.grade()
    );

    Ok(())
}
