use std::fmt::Display;
use std::iter::Peekable;

use crate::source::types::RecordSource;
use crate::types::SourceError;

/// Source over any infallible iterator.
pub struct IterSource<I: Iterator> {
    inner: Peekable<I>,
}

impl<I: Iterator> IterSource<I> {
    pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
        Self { inner: iter.into_iter().peekable() }
    }
}

impl<I: Iterator> RecordSource for IterSource<I> {
    type Record = I::Item;

    fn has_next(&mut self) -> Result<bool, SourceError> {
        Ok(self.inner.peek().is_some())
    }

    fn next_record(&mut self) -> Result<Option<I::Item>, SourceError> {
        Ok(self.inner.next())
    }
}

/// Source over an iterator of `Result`s.
///
/// A pending `Err` still counts as "has next": the failure is reported by the
/// following `next_record` call, never swallowed as end of input.
pub struct FallibleIterSource<I: Iterator> {
    inner: Peekable<I>,
}

impl<I: Iterator> FallibleIterSource<I> {
    pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
        Self { inner: iter.into_iter().peekable() }
    }
}

impl<I, R, E> RecordSource for FallibleIterSource<I>
where
    I: Iterator<Item = Result<R, E>>,
    E: Display,
{
    type Record = R;

    fn has_next(&mut self) -> Result<bool, SourceError> {
        Ok(self.inner.peek().is_some())
    }

    fn next_record(&mut self) -> Result<Option<R>, SourceError> {
        match self.inner.next() {
            Some(Ok(record)) => Ok(Some(record)),
            Some(Err(e)) => Err(SourceError::new(e.to_string())),
            None => Ok(None),
        }
    }
}
