use super::dict::Dict;
use super::value::Variant;

impl<'a> Dict<'a> {
    /// Upserts every entry of `src` into `self`.
    ///
    /// Keys missing from `self` are copied in and keys present in both take
    /// the value from `src`, whatever its kind. The one exception is a key
    /// holding a dictionary on both sides: those two dictionaries are merged
    /// by the same rule instead of being replaced. Keys only in `self` are
    /// left alone, and `src` is not modified.
    ///
    /// # Examples
    ///
    /// ```
    /// use rvariant::{Dict, Quark};
    ///
    /// let (i1, i2, i3) = (Quark::new("i1"), Quark::new("i2"), Quark::new("i3"));
    ///
    /// let mut dest: Dict = [(i1, 1), (i2, 2)].into_iter().collect();
    /// let src: Dict = [(i2, 4), (i3, 3)].into_iter().collect();
    /// dest.merge(&src);
    ///
    /// assert_eq!(dest.find_int(i1), Ok(1));
    /// assert_eq!(dest.find_int(i2), Ok(4));
    /// assert_eq!(dest.find_int(i3), Ok(3));
    /// ```
    pub fn merge(&mut self, src: &Dict<'a>) {
        let mut pending = vec![(self, src)];

        while let Some((dest, src)) = pending.pop() {
            for (key, value) in src.iter() {
                let nested = matches!(
                    (dest.get(key), value),
                    (Some(Variant::Dict(_)), Variant::Dict(_))
                );
                if !nested {
                    dest.insert(key, value.clone());
                }
            }

            for (key, value) in dest.iter_mut() {
                if let (Variant::Dict(inner), Some(Variant::Dict(from))) = (value, src.get(key)) {
                    pending.push((inner, from));
                }
            }
        }
    }
}

impl<'a> Variant<'a> {
    /// Merges `src` into `self` when both are dictionaries, returning whether
    /// anything was merged.
    pub fn merge(&mut self, src: &Variant<'a>) -> bool {
        match (self, src) {
            (Variant::Dict(dest), Variant::Dict(src)) => {
                dest.merge(src);
                true
            }
            _ => false,
        }
    }
}
