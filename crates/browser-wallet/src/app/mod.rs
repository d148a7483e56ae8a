pub(crate) mod contents;
