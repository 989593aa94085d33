/// Static one-to-many channel expansion table.
///
/// Some exchanges acknowledge a *logical* channel ("full", "l2") but
/// emit data under several *physical* channel names. This table maps
/// the former to the latter.
///
/// Tables are built in `const` context, so a logical name without
/// physical targets, or a logical name listed twice, fails the build
/// instead of surfacing at runtime.
///
#[derive(Debug, Clone, Copy)]
pub struct ExpansionTable {
    entries: &'static [(&'static str, &'static [&'static str])],
}

impl ExpansionTable {
    pub const fn new(entries: &'static [(&'static str, &'static [&'static str])]) -> Self {
        let mut i = 0;
        while i < entries.len() {
            assert!(
                !entries[i].1.is_empty(),
                "expansion table entry has no physical channels"
            );

            let mut j = i + 1;
            while j < entries.len() {
                assert!(
                    !str_eq(entries[i].0, entries[j].0),
                    "expansion table lists a logical channel twice"
                );
                j += 1;
            }
            i += 1;
        }

        Self { entries }
    }

    /// Physical channel names for `logical`, in table order.
    pub fn expand(&self, logical: &str) -> Option<&'static [&'static str]> {
        self.entries
            .iter()
            .find(|(name, _)| *name == logical)
            .map(|(_, physical)| *physical)
    }

    pub fn logical_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }
}

const fn str_eq(a: &str, b: &str) -> bool {
    let a = a.as_bytes();
    let b = b.as_bytes();
    if a.len() != b.len() {
        return false;
    }

    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}
