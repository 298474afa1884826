/// Collects errors so one expansion can report every problem at once.
#[derive(Debug)]
pub(crate) struct ErrorSet {
    errors: Vec<syn::Error>,
}

impl ErrorSet {
    pub(crate) fn new() -> Self {
        Self { errors: vec![] }
    }

    pub(crate) fn push(&mut self, err: syn::Error) {
        self.errors.push(err);
    }

    /// Combines the errors pushed so far into one, leaving the set empty.
    pub(crate) fn collect(&mut self) -> Option<syn::Error> {
        std::mem::take(&mut self.errors).into_iter().reduce(|mut acc, err| {
            acc.combine(err);
            acc
        })
    }
}
