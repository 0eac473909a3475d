use crewboard_core::{
    DenyReason, MemStore, NewProject, NewTask, NewUser, ProjectPatch, ProjectService,
    ServiceError, SessionGateway, TaskService, UserId, UserService,
};
use uuid::Uuid;

fn services() -> (
    UserService<MemStore>,
    ProjectService<MemStore>,
    TaskService<MemStore>,
) {
    let store = MemStore::new();
    let gateway = SessionGateway::new();
    (
        UserService::new(store.clone()),
        ProjectService::new(store.clone(), gateway.clone()),
        TaskService::new(store, gateway),
    )
}

fn register(users: &UserService<MemStore>, email: &str, handle: &str) -> UserId {
    users
        .register_user(NewUser {
            email: email.to_string(),
            handle: handle.to_string(),
            avatar_url: None,
        })
        .unwrap()
        .id
}

fn named(name: &str) -> NewProject {
    NewProject {
        name: name.to_string(),
        description: String::new(),
    }
}

#[test]
fn creator_becomes_owner_and_sole_member() {
    let (users, projects, _) = services();
    let owner = register(&users, "u1@example.com", "u1");

    let project = projects.create_project(owner, named("Sprint 9")).unwrap();
    assert_eq!(project.owner_id, owner);
    assert_eq!(project.members, vec![owner]);
    assert!(project.task_ids.is_empty());
}

#[test]
fn blank_name_is_rejected_before_anything_else() {
    let (users, projects, _) = services();
    let owner = register(&users, "u1@example.com", "u1");

    let err = projects.create_project(owner, named("   ")).unwrap_err();
    assert_eq!(err.code(), "INVALID_INPUT");
}

#[test]
fn owner_remains_member_after_every_member_add() {
    let (users, projects, _) = services();
    let owner = register(&users, "u1@example.com", "u1");
    let project = projects.create_project(owner, named("p")).unwrap();

    for n in 0..3 {
        let member = register(&users, &format!("m{n}@example.com"), &format!("m{n}"));
        let updated = projects.add_member(owner, project.id, member).unwrap();
        assert!(updated.members.contains(&updated.owner_id));
        assert_eq!(updated.members.len(), 2 + n);
    }
}

#[test]
fn member_add_is_owner_only_and_duplicate_safe() {
    let (users, projects, _) = services();
    let owner = register(&users, "u1@example.com", "u1");
    let member = register(&users, "u2@example.com", "u2");
    let project = projects.create_project(owner, named("p")).unwrap();

    assert_eq!(
        projects.add_member(member, project.id, member),
        Err(ServiceError::Forbidden(DenyReason::NotOwner))
    );

    projects.add_member(owner, project.id, member).unwrap();
    assert_eq!(
        projects.add_member(owner, project.id, member),
        Err(ServiceError::Forbidden(DenyReason::AlreadyMember))
    );
}

#[test]
fn update_is_owner_only_and_patch_is_partial() {
    let (users, projects, _) = services();
    let owner = register(&users, "u1@example.com", "u1");
    let member = register(&users, "u2@example.com", "u2");
    let project = projects.create_project(owner, named("old name")).unwrap();
    projects.add_member(owner, project.id, member).unwrap();

    assert_eq!(
        projects.update_project(
            member,
            project.id,
            ProjectPatch {
                name: Some("hijacked".to_string()),
                description: None,
            },
        ),
        Err(ServiceError::Forbidden(DenyReason::NotOwner))
    );

    let updated = projects
        .update_project(
            owner,
            project.id,
            ProjectPatch {
                name: None,
                description: Some("docs first".to_string()),
            },
        )
        .unwrap();
    assert_eq!(updated.name, "old name");
    assert_eq!(updated.description, "docs first");
    assert!(updated.updated_at >= project.updated_at);

    let err = projects
        .update_project(
            owner,
            project.id,
            ProjectPatch {
                name: Some("  ".to_string()),
                description: None,
            },
        )
        .unwrap_err();
    assert_eq!(err.code(), "INVALID_INPUT");
}

#[test]
fn view_requires_membership_and_listing_filters_by_it() {
    let (users, projects, _) = services();
    let owner = register(&users, "u1@example.com", "u1");
    let outsider = register(&users, "u3@example.com", "u3");
    let project = projects.create_project(owner, named("mine")).unwrap();

    assert_eq!(
        projects.get_project(outsider, project.id),
        Err(ServiceError::Forbidden(DenyReason::NotMember))
    );
    assert!(projects.list_projects(outsider).unwrap().is_empty());

    let listed = projects.list_projects(owner).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, project.id);
}

#[test]
fn missing_project_short_circuits_before_authorization() {
    let (users, projects, _) = services();
    let actor = register(&users, "u1@example.com", "u1");
    let ghost = Uuid::new_v4();

    assert_eq!(
        projects.get_project(actor, ghost),
        Err(ServiceError::NotFound(ghost))
    );
    assert_eq!(
        projects.delete_project(actor, ghost),
        Err(ServiceError::NotFound(ghost))
    );
}

#[test]
fn deleting_a_project_cascades_over_its_tasks() {
    let (users, projects, tasks) = services();
    let owner = register(&users, "u1@example.com", "u1");
    let member = register(&users, "u2@example.com", "u2");
    let project = projects.create_project(owner, named("doomed")).unwrap();
    projects.add_member(owner, project.id, member).unwrap();

    let mut created = Vec::new();
    for n in 0..3 {
        let task = tasks
            .create_task(
                member,
                project.id,
                NewTask {
                    title: format!("task {n}"),
                    description: String::new(),
                    priority: None,
                    due_at: 1_700_000_000_000 + n,
                    assigned_to: owner,
                },
            )
            .unwrap();
        created.push(task.id);
    }

    assert_eq!(
        projects.delete_project(member, project.id),
        Err(ServiceError::Forbidden(DenyReason::NotOwner))
    );

    projects.delete_project(owner, project.id).unwrap();
    for id in created {
        assert_eq!(tasks.get_task(owner, id), Err(ServiceError::NotFound(id)));
    }
    assert!(tasks.list_project_tasks(owner, project.id).unwrap().is_empty());
}
