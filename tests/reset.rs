//! Integration tests for independent resets and tagged mock dispatch

use mimic::matching::any;
use mimic::{
    args, pattern, reset_all, Behavior, ExpectedArgs, ExpectedCount, FunctionMock, Mock,
    MockError, ResetScope, Resettable, StructuredMock, Value,
};

fn returned(mock: &mut FunctionMock, args: Vec<Value>) -> Value {
    mock.invoke(args)
        .expect("call")
        .into_value()
        .expect("sync result")
}

fn configured() -> FunctionMock {
    let mut mock = FunctionMock::with_default("f", Behavior::Return(Value::from("default")));
    mock.set_override(args![1], Behavior::Return(Value::from("one")))
        .suppose(ExpectedArgs::Any, ExpectedCount::Exactly(3));
    returned(&mut mock, args![1]);
    returned(&mut mock, args![2]);
    mock
}

#[test]
fn test_reset_behaviour_keeps_history() {
    let mut mock = configured();
    mock.reset_behaviour();

    assert_eq!(returned(&mut mock, args![1]), Value::Undefined);
    assert_eq!(mock.behaviors().overrides().count(), 0);
    assert_eq!(mock.spy().call_count(), 3);
    assert!(mock.verify().is_ok());
}

#[test]
fn test_reset_call_history_keeps_behaviour() {
    let mut mock = configured();
    mock.reset_call_history();

    assert!(mock.verify_that().was_never_called().is_ok());
    assert!(mock.verify().is_err());
    assert_eq!(returned(&mut mock, args![1]), Value::from("one"));
    assert_eq!(returned(&mut mock, args![5]), Value::from("default"));
    assert_eq!(mock.spy().nth_call(0).expect("first").sequence, 0);

    // Matched-call counters belong to the override, not to the history.
    let (_, found) = mock.behaviors().overrides().next().expect("override");
    assert_eq!(found.matched_calls, 2);
}

#[test]
fn test_reset_suppositions_keeps_everything_else() {
    let mut mock = configured();
    assert!(mock.verify().is_err());

    mock.reset_suppositions();
    assert!(mock.suppositions().is_empty());
    assert!(mock.verify().is_ok());
    assert_eq!(mock.spy().call_count(), 2);
    assert_eq!(returned(&mut mock, args![1]), Value::from("one"));
}

#[test]
fn test_reset_completely() {
    let mut mock = configured();
    mock.reset(ResetScope::Completely);

    assert_eq!(mock.spy().call_count(), 0);
    assert!(mock.suppositions().is_empty());
    assert_eq!(returned(&mut mock, args![1]), Value::Undefined);
}

#[test]
fn test_structured_reset_fans_out() {
    let mut repo = StructuredMock::new("Repo", ["find", "save"]);
    repo.member_mut("find")
        .expect("member")
        .set_default(Behavior::Return(Value::Null));
    repo.member_mut("save")
        .expect("member")
        .suppose(ExpectedArgs::Any, ExpectedCount::AtLeastOnce);
    repo.invoke("find", args![1]).expect("find");
    repo.invoke("save", args![1]).expect("save");

    repo.reset_call_history();
    for (_, member) in repo.members() {
        assert_eq!(member.spy().call_count(), 0);
    }
    assert!(repo.verify().is_err());

    let find = repo.invoke("find", args![1]).expect("find");
    assert_eq!(find.into_value(), Some(Value::Null));

    repo.reset_completely();
    let find = repo.invoke("find", args![1]).expect("find");
    assert_eq!(find.into_value(), Some(Value::Undefined));
    assert!(repo.verify().is_ok());
}

#[test]
fn test_reset_all_mixed_mocks() {
    let mut first = configured();
    let mut second = configured();
    let mut repo = StructuredMock::new("Repo", ["find"]);
    repo.invoke("find", args![]).expect("find");

    reset_all(
        [
            &mut first as &mut dyn Resettable,
            &mut second,
            &mut repo,
        ],
        ResetScope::CallHistory,
    );

    assert_eq!(first.spy().call_count(), 0);
    assert_eq!(second.spy().call_count(), 0);
    assert_eq!(repo.member("find").expect("member").spy().call_count(), 0);
    assert_eq!(returned(&mut first, args![1]), Value::from("one"));
}

#[test]
fn test_mock_dispatches_on_tag() {
    let mut mocks: Vec<Mock> = vec![
        configured().into(),
        StructuredMock::new("Repo", ["find"]).into(),
    ];

    assert_eq!(mocks[0].name(), "f");
    assert_eq!(mocks[1].name(), "Repo");
    assert!(mocks[0].as_function().is_some());
    assert!(mocks[1].as_structured().is_some());
    assert!(mocks[0].verify().is_err());
    assert!(mocks[1].verify().is_ok());

    mocks[1]
        .member_mut("find")
        .expect("member")
        .suppose(pattern![any()].into_iter().collect(), ExpectedCount::Never);

    for mock in &mut mocks {
        mock.reset(ResetScope::Suppositions);
    }
    assert!(mocks.iter().all(|m| m.verify().is_ok()));
}

#[test]
fn test_function_mock_has_no_members() {
    let mut mock: Mock = FunctionMock::new("f").into();
    assert_eq!(
        mock.member_mut("find").unwrap_err(),
        MockError::UnknownMember {
            mock: "f".to_string(),
            member: "find".to_string(),
        }
    );
}
