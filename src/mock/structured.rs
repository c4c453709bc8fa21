//! Structured mocks: one independent function mock per member of a
//! class, interface or abstract type.

use std::collections::BTreeMap;

use mimic_value::Value;

use crate::config::MockConfig;
use crate::error::MockError;

use super::behavior::Returned;
use super::function::FunctionMock;

/// A named collection of member mocks.
///
/// Members are fixed at construction. Asking for any other name is an
/// [`MockError::UnknownMember`] rather than a silent `undefined`.
#[derive(Debug)]
pub struct StructuredMock {
    pub(crate) name: String,
    pub(crate) members: BTreeMap<String, FunctionMock>,
}

impl StructuredMock {
    pub fn new<I, S>(name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_config(name, members, MockConfig::default())
    }

    /// Every member mock gets `config`. Member mocks are named
    /// `"<mock>.<member>"` so failures point at the right method.
    pub fn with_config<I, S>(name: impl Into<String>, members: I, config: MockConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let members = members
            .into_iter()
            .map(Into::into)
            .map(|member: String| {
                let mock = FunctionMock::with_config(format!("{name}.{member}"), config);
                (member, mock)
            })
            .collect();
        Self { name, members }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn member_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.members.keys().map(String::as_str)
    }

    pub fn has_member(&self, member: &str) -> bool {
        self.members.contains_key(member)
    }

    pub fn member(&self, member: &str) -> Result<&FunctionMock, MockError> {
        self.members
            .get(member)
            .ok_or_else(|| MockError::UnknownMember {
                mock: self.name.clone(),
                member: member.to_string(),
            })
    }

    pub fn member_mut(&mut self, member: &str) -> Result<&mut FunctionMock, MockError> {
        let mock = &self.name;
        self.members
            .get_mut(member)
            .ok_or_else(|| MockError::UnknownMember {
                mock: mock.clone(),
                member: member.to_string(),
            })
    }

    pub fn members(&self) -> impl Iterator<Item = (&str, &FunctionMock)> + '_ {
        self.members.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Invoke one member.
    pub fn invoke(&mut self, member: &str, args: Vec<Value>) -> Result<Returned, MockError> {
        Ok(self.member_mut(member)?.invoke(args)?)
    }

    /// Verify every member that has suppositions. Members without any are
    /// trivially satisfied. Fails with the first member that does not verify.
    pub fn verify(&self) -> Result<(), MockError> {
        self.members
            .values()
            .filter(|mock| !mock.suppositions().is_empty())
            .try_for_each(FunctionMock::verify)
    }
}
