/// Extends string types with useful functions
pub trait StringExt {
    /// Capitalises the first letter in a string and lowers the rest
    ///
    /// Element symbols come in all sorts of cases depending on where they were
    /// typed, so this is used to normalise them.
    ///
    /// ```rust
    /// # use rnlib_utils::StringExt;
    /// assert_eq!("tc".capitalise(), "Tc".to_string());
    /// assert_eq!("AC".capitalise(), "Ac".to_string());
    /// ```
    fn capitalise(&self) -> String;
}

impl<T: AsRef<str>> StringExt for T {
    fn capitalise(&self) -> String {
        let mut c = self.as_ref().chars();
        match c.next() {
            Some(f) => f.to_uppercase().collect::<String>() + &c.as_str().to_lowercase(),
            None => String::new(),
        }
    }
}
