use fxhash::FxHashMap;

use super::sym::Sym;

/// Case-insensitive key space. Every canonical (lower-cased) name is
/// interned to a [`Sym`], and the first spelling seen for it is kept as
/// its original.
#[derive(Clone, Default)]
pub(crate) struct KeyTable {
    count: Sym,
    map_strs: FxHashMap<Box<str>, Sym>,
    originals: Vec<Box<str>>,
}

#[inline]
pub(crate) fn canonical(name: &str) -> String {
    name.to_lowercase()
}

impl KeyTable {
    pub(crate) fn new() -> Self {
        KeyTable::default()
    }

    /// Interns `name`, returning its symbol and whether this is the first
    /// time its canonical form was seen.
    pub(crate) fn get_or_intern(&mut self, name: &str) -> (Sym, bool) {
        let key = canonical(name);
        match self.map_strs.get(key.as_str()) {
            Some(sym) => (*sym, false),
            None => {
                let sym = self.count;
                self.map_strs.insert(key.into_boxed_str(), sym);
                self.originals.push(name.into());
                self.count += 1;
                (sym, true)
            }
        }
    }

    #[inline]
    pub(crate) fn get(&self, name: &str) -> Option<Sym> {
        self.map_strs.get(canonical(name).as_str()).copied()
    }

    /// Original spelling of a symbol.
    #[inline]
    pub(crate) fn resolve(&self, sym: Sym) -> &str {
        &self.originals[sym.into_usize()]
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.originals.len()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for KeyTable {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.originals.len()))?;
        for val in self.originals.iter() {
            seq.serialize_element(val)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for KeyTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let mut table = KeyTable::new();
        let values: Vec<Box<str>> = Vec::deserialize(deserializer)?;
        for val in values {
            if !table.get_or_intern(&val).1 {
                return Err(serde::de::Error::custom(format!(
                    "Duplicate name `{val}`"
                )));
            }
        }
        Ok(table)
    }
}
