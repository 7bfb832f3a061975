#[cfg(test)]
pub(crate) mod common;

#[cfg(test)]
mod test_candidate;
