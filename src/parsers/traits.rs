use crate::errors::StatementResult;
use crate::pages::Page;

pub trait Parser {
    type Output;

    fn parse(&self, pages: &[Page]) -> StatementResult<Self::Output>;

    fn is_supported(&self, pages: &[Page]) -> bool;
}
