use vodca::{AsRefln, Fromln};

#[derive(Clone, PartialEq, Eq, Fromln, AsRefln)]
pub struct CustomerPassword(String);

impl CustomerPassword {
    pub fn new(password: impl Into<String>) -> Self {
        Self(password.into())
    }
}

impl std::fmt::Debug for CustomerPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CustomerPassword(***)")
    }
}
