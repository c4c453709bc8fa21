//! Mocks
//!
//! A [`FunctionMock`] intercepts calls to one callable. A [`StructuredMock`]
//! groups one function mock per member of a type. [`Mock`] is the tagged
//! union of the two, so reset and verification can dispatch on the tag.

mod behavior;
mod function;
mod structured;

pub use behavior::{
    Behavior, BehaviorKind, BehaviorRegistry, Callback, Override, Resolution, Returned, Settled,
};
pub use function::FunctionMock;
pub use structured::StructuredMock;

use crate::error::MockError;

#[derive(Debug)]
pub enum Mock {
    Function(FunctionMock),
    Structured(StructuredMock),
}

impl Mock {
    pub fn name(&self) -> &str {
        match self {
            Mock::Function(mock) => mock.name(),
            Mock::Structured(mock) => mock.name(),
        }
    }

    pub fn verify(&self) -> Result<(), MockError> {
        match self {
            Mock::Function(mock) => mock.verify(),
            Mock::Structured(mock) => mock.verify(),
        }
    }

    pub fn as_function(&self) -> Option<&FunctionMock> {
        match self {
            Mock::Function(mock) => Some(mock),
            Mock::Structured(_) => None,
        }
    }

    pub fn as_structured(&self) -> Option<&StructuredMock> {
        match self {
            Mock::Structured(mock) => Some(mock),
            Mock::Function(_) => None,
        }
    }

    /// The member mock `member` of a structured mock. For a function mock,
    /// any member access is an [`MockError::UnknownMember`].
    pub fn member_mut(&mut self, member: &str) -> Result<&mut FunctionMock, MockError> {
        match self {
            Mock::Structured(mock) => mock.member_mut(member),
            Mock::Function(mock) => Err(MockError::UnknownMember {
                mock: mock.name().to_string(),
                member: member.to_string(),
            }),
        }
    }
}

impl From<FunctionMock> for Mock {
    fn from(mock: FunctionMock) -> Self {
        Mock::Function(mock)
    }
}

impl From<StructuredMock> for Mock {
    fn from(mock: StructuredMock) -> Self {
        Mock::Structured(mock)
    }
}
