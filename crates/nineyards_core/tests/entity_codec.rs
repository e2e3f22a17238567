use chrono::{TimeZone, Utc};
use nineyards_core::codec::schema::EntitySchema;
use nineyards_core::{
    decode, decode_list, decode_optional, decode_with, encode, encode_optional, AuthenticatedUser,
    CodecOptions, DecodeError, EditSubTask, EditTaskGroup, Entity, FullNotification, FullTask,
    Login, Patch, ProjectBuilder, Register, SubTask, Task, TaskGroup, User,
};
use serde_json::{json, Value};

fn task_wire() -> Value {
    json!({
        "id": "tk0000000001",
        "project_id": "pr0000000001",
        "task_group_id": "tg0000000001",
        "name": "Write release notes",
        "information": "Cover the board changes",
        "creator": "us0000000001",
        "position": 2,
        "due": "2024-04-01T09:00:00Z",
        "primary_colour": "#1e293b",
        "accent_colour": "#f97316",
        "created": "2024-03-05T12:30:00.250"
    })
}

fn sub_task_wire(id: &str, position: u64, completed: bool, weight: u64) -> Value {
    json!({
        "id": id,
        "task_id": "tk0000000001",
        "assignee": "us0000000002",
        "body": "Draft",
        "completed": completed,
        "position": position,
        "weight": weight
    })
}

fn notification_wire() -> Value {
    json!({
        "actions": [{
            "id": "na0000000001",
            "notification_id": "no0000000001",
            "title": "Accept",
            "action_endpoint": "/api/v1/projects/pr0000000001/accept"
        }],
        "body": "You were invited to Roadmap",
        "created": "2024-03-05T12:30:00+02:00",
        "id": "no0000000001",
        "read": false,
        "user_id": "us0000000001"
    })
}

fn project_builder_wire() -> Value {
    json!({
        "icon_url": "https://cdn.example.com/roadmap.png",
        "name": "Roadmap",
        "public_permissions": 0
    })
}

fn user_wire() -> Value {
    json!({ "id": "us0000000001", "username": "ada", "email": "ada@example.com" })
}

/// Removes each required key in turn and checks decode names it.
fn assert_each_required_field_is_enforced<E: Entity + std::fmt::Debug>(wire: &Value) {
    let schema: &EntitySchema = E::SCHEMA;
    for field in schema.required_fields() {
        let mut partial = wire.clone();
        partial
            .as_object_mut()
            .expect("fixture must be an object")
            .remove(field.wire);

        let err = decode::<E>(&partial).expect_err("missing required field must fail");
        assert_eq!(
            err,
            DecodeError::MissingRequiredField {
                entity: schema.name,
                field: field.wire,
            },
            "removing `{}` from {}",
            field.wire,
            schema.name
        );
    }
}

#[test]
fn task_group_example_decodes_and_reencodes_exactly() {
    let wire = json!({ "id": "t1", "name": "Backlog", "position": 0, "project_id": "p1" });

    let group: TaskGroup = decode(&wire).unwrap().unwrap();
    assert_eq!(
        group,
        TaskGroup {
            id: "t1".to_string(),
            name: "Backlog".to_string(),
            position: 0,
            project_id: "p1".to_string(),
        }
    );
    assert_eq!(
        serde_json::to_value(&group).unwrap(),
        json!({ "id": "t1", "name": "Backlog", "position": 0, "projectId": "p1" })
    );
    assert_eq!(encode(&group).unwrap(), wire);
}

#[test]
fn full_task_with_empty_sub_tasks_decodes() {
    let wire = json!({ "sub_tasks": [], "task": task_wire() });

    let full: FullTask = decode(&wire).unwrap().unwrap();
    assert!(full.sub_tasks.is_empty());
    assert_eq!(full.task.id, "tk0000000001");
    assert_eq!(full.task.information.as_deref(), Some("Cover the board changes"));
    assert_eq!(
        full.task.created,
        Utc.with_ymd_and_hms(2024, 3, 5, 12, 30, 0).unwrap() + chrono::Duration::milliseconds(250)
    );
    assert_eq!(full.completion(), None);
}

#[test]
fn full_task_decodes_sub_tasks_element_wise() {
    let wire = json!({
        "sub_tasks": [
            sub_task_wire("st0000000002", 1, false, 1),
            sub_task_wire("st0000000001", 0, true, 3)
        ],
        "task": task_wire()
    });

    let full: FullTask = decode(&wire).unwrap().unwrap();
    assert_eq!(full.sub_tasks.len(), 2);
    assert_eq!(full.completion(), Some(0.75));
    let ordered: Vec<&str> = full
        .ordered_sub_tasks()
        .iter()
        .map(|sub_task| sub_task.id.as_str())
        .collect();
    assert_eq!(ordered, vec!["st0000000001", "st0000000002"]);
}

#[test]
fn full_task_missing_sub_tasks_fails_fast() {
    let err = decode::<FullTask>(&json!({ "task": task_wire() })).unwrap_err();
    assert_eq!(
        err,
        DecodeError::MissingRequiredField {
            entity: "FullTask",
            field: "sub_tasks",
        }
    );
}

#[test]
fn nested_sub_task_failure_reports_index_and_field() {
    let mut broken = sub_task_wire("st0000000001", 0, false, 1);
    broken.as_object_mut().unwrap().remove("task_id");
    let wire = json!({ "sub_tasks": [sub_task_wire("st0000000002", 1, false, 1), broken], "task": task_wire() });

    let err = decode::<FullTask>(&wire).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::InElement {
            entity: "FullTask",
            field: Some("sub_tasks"),
            index: 1,
            ..
        }
    ));
    assert_eq!(
        err.innermost(),
        &DecodeError::MissingRequiredField {
            entity: "SubTask",
            field: "task_id",
        }
    );
}

#[test]
fn notification_dates_decode_to_instants_and_reencode_canonically() {
    let notification: FullNotification = decode(&notification_wire()).unwrap().unwrap();
    assert_eq!(
        notification.created,
        Utc.with_ymd_and_hms(2024, 3, 5, 10, 30, 0).unwrap()
    );
    assert_eq!(notification.actions.len(), 1);
    assert_eq!(notification.actions[0].action_endpoint, "/api/v1/projects/pr0000000001/accept");
    assert!(notification.is_unread());

    let wire = encode(&notification).unwrap();
    assert_eq!(wire["created"], "2024-03-05T10:30:00.000Z");
    assert_eq!(wire["user_id"], "us0000000001");
    assert_eq!(wire["actions"][0]["notification_id"], "no0000000001");
}

#[test]
fn malformed_dates_fail_the_decode() {
    let mut wire = notification_wire();
    wire["created"] = json!("yesterday");

    let err = decode::<FullNotification>(&wire).unwrap_err();
    assert_eq!(
        err,
        DecodeError::MalformedDate {
            entity: "FullNotification",
            field: "created",
            raw: "yesterday".to_string(),
        }
    );
}

#[test]
fn every_entity_enforces_its_required_fields() {
    assert_each_required_field_is_enforced::<TaskGroup>(
        &json!({ "id": "t1", "name": "Backlog", "position": 0, "project_id": "p1" }),
    );
    assert_each_required_field_is_enforced::<Task>(&task_wire());
    assert_each_required_field_is_enforced::<SubTask>(&sub_task_wire("st0000000001", 0, false, 1));
    assert_each_required_field_is_enforced::<FullTask>(&json!({ "sub_tasks": [], "task": task_wire() }));
    assert_each_required_field_is_enforced::<FullNotification>(&notification_wire());
    assert_each_required_field_is_enforced::<ProjectBuilder>(&project_builder_wire());
    assert_each_required_field_is_enforced::<User>(&user_wire());
    assert_each_required_field_is_enforced::<AuthenticatedUser>(
        &json!({ "user": user_wire(), "token": "tok" }),
    );
    assert_each_required_field_is_enforced::<Register>(
        &json!({ "username": "ada", "email": "ada@example.com", "password": "pw" }),
    );
    assert_each_required_field_is_enforced::<Login>(
        &json!({ "username_or_email": "ada", "password": "pw" }),
    );
}

#[test]
fn decode_encode_decode_is_idempotent() {
    fn check<E: Entity + PartialEq + std::fmt::Debug>(wire: Value) {
        let first: E = decode(&wire).unwrap().unwrap();
        let second: E = decode(&encode(&first).unwrap()).unwrap().unwrap();
        assert_eq!(first, second);
    }

    check::<Task>(task_wire());
    check::<FullTask>(json!({ "sub_tasks": [sub_task_wire("st0000000001", 0, true, 2)], "task": task_wire() }));
    check::<FullNotification>(notification_wire());
    check::<ProjectBuilder>(project_builder_wire());
    check::<AuthenticatedUser>(json!({ "user": user_wire(), "token": "tok" }));
    check::<EditSubTask>(json!({ "body": null, "weight": 4 }));
}

#[test]
fn required_fields_survive_the_round_trip() {
    let wire = project_builder_wire();
    let builder: ProjectBuilder = decode(&wire).unwrap().unwrap();
    assert_eq!(encode(&builder).unwrap(), wire);

    let wire = sub_task_wire("st0000000001", 4, true, 2);
    let sub_task: SubTask = decode(&wire).unwrap().unwrap();
    assert_eq!(encode(&sub_task).unwrap(), wire);
}

#[test]
fn null_and_missing_top_level_input_pass_through() {
    assert_eq!(decode::<TaskGroup>(&Value::Null).unwrap(), None);
    assert_eq!(decode_optional::<TaskGroup>(None).unwrap(), None);
    assert_eq!(encode_optional::<TaskGroup>(None).unwrap(), Value::Null);
}

#[test]
fn non_object_input_is_rejected() {
    let err = decode::<TaskGroup>(&json!("Backlog")).unwrap_err();
    assert_eq!(err, DecodeError::NotAnObject { entity: "TaskGroup" });
}

#[test]
fn type_mismatches_name_the_field() {
    let wire = json!({ "id": "t1", "name": "Backlog", "position": "0", "project_id": "p1" });
    let err = decode::<TaskGroup>(&wire).unwrap_err();
    assert_eq!(
        err,
        DecodeError::InvalidFieldType {
            entity: "TaskGroup",
            field: "position",
            expected: "non-negative integer",
        }
    );

    let wire = json!({ "id": "t1", "name": null, "position": 0, "project_id": "p1" });
    assert!(matches!(
        decode::<TaskGroup>(&wire).unwrap_err(),
        DecodeError::InvalidFieldType { field: "name", .. }
    ));
}

#[test]
fn edit_sub_task_empty_object_leaves_everything_absent() {
    let edit: EditSubTask = decode(&json!({})).unwrap().unwrap();
    assert_eq!(edit, EditSubTask::default());
    assert!(edit.is_empty());
    assert_eq!(encode(&edit).unwrap(), json!({}));
}

#[test]
fn edit_sub_task_keeps_null_distinct_from_absent() {
    let wire = json!({ "assignee": null, "completed": true, "position": 3 });
    let edit: EditSubTask = decode(&wire).unwrap().unwrap();

    assert_eq!(edit.assignee, Patch::Null);
    assert_eq!(edit.body, Patch::Absent);
    assert_eq!(edit.completed, Patch::Value(true));
    assert_eq!(edit.position, Patch::Value(3));
    assert_eq!(edit.weight, Patch::Absent);
    assert_eq!(encode(&edit).unwrap(), wire);
}

#[test]
fn edit_task_group_encodes_only_set_fields() {
    let edit = EditTaskGroup {
        name: Patch::Value("Done".to_string()),
        ..EditTaskGroup::default()
    };
    assert_eq!(encode(&edit).unwrap(), json!({ "name": "Done" }));
}

#[test]
fn strict_options_flag_schema_drift() {
    let wire = json!({ "id": "t1", "name": "Backlog", "position": 0, "project_id": "p1", "archived": false });
    assert!(decode::<TaskGroup>(&wire).unwrap().is_some());

    let err = decode_with::<TaskGroup>(&wire, &CodecOptions::strict()).unwrap_err();
    assert_eq!(
        err,
        DecodeError::UnknownField {
            entity: "TaskGroup",
            key: "archived".to_string(),
        }
    );
}

#[test]
fn list_payloads_decode_every_element() {
    let wire = json!([
        { "id": "t1", "name": "Backlog", "position": 0, "project_id": "p1" },
        { "id": "t2", "name": "Doing", "position": 1, "project_id": "p1" }
    ]);
    let groups: Vec<TaskGroup> = decode_list(&wire).unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[1].name, "Doing");

    let err = decode_list::<TaskGroup>(&json!([{ "id": "t3" }])).unwrap_err();
    assert!(matches!(err, DecodeError::InElement { field: None, index: 0, .. }));
}

#[test]
fn optional_task_fields_may_be_null_or_absent() {
    let mut wire = task_wire();
    wire["information"] = Value::Null;
    wire.as_object_mut().unwrap().remove("due");

    let task: Task = decode(&wire).unwrap().unwrap();
    assert_eq!(task.information, None);
    assert_eq!(task.due, None);

    let encoded = encode(&task).unwrap();
    assert!(encoded.get("due").is_none());
    assert_eq!(encoded["created"], "2024-03-05T12:30:00.250Z");
}

#[test]
fn credentials_are_redacted_from_debug_output() {
    let login = Login {
        username_or_email: "ada".to_string(),
        password: "hunter22".to_string(),
    };
    assert!(!format!("{login:?}").contains("hunter22"));
}

#[test]
fn task_accepts_epoch_millisecond_dates() {
    let mut wire = task_wire();
    // 2024-03-05T12:00:00Z and 2024-03-08T12:00:00Z
    wire["created"] = json!(1_709_640_000_000_i64);
    wire["due"] = json!(1_709_899_200_000_i64);

    let task: Task = decode(&wire).unwrap().unwrap();
    assert_eq!(task.created, Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap());
    assert_eq!(task.days_until_due(1_709_640_000_000), Some(3));
    assert_eq!(task.due_label().as_deref(), Some("March, 8, 2024"));

    let encoded = encode(&task).unwrap();
    assert_eq!(encoded["created"], "2024-03-05T12:00:00.000Z");
    assert_eq!(encoded["due"], "2024-03-08T12:00:00.000Z");
}

#[test]
fn backend_timestamps_keep_nanosecond_precision() {
    let created = Utc.with_ymd_and_hms(2026, 10, 16, 8, 16, 54).unwrap()
        + chrono::Duration::nanoseconds(92_654_820);
    let mut wire = notification_wire();
    wire["created"] = serde_json::to_value(created.naive_utc()).unwrap();

    let notification: FullNotification = decode(&wire).unwrap().unwrap();
    assert_eq!(notification.created, created);

    let reencoded = encode(&notification).unwrap();
    assert_eq!(reencoded["created"], "2026-10-16T08:16:54.092654820Z");
    let again: FullNotification = decode(&reencoded).unwrap().unwrap();
    assert_eq!(again.created, created);
}
