pub(crate) mod landmarks;
