use crewboard_core::{
    ClientCache, MemStore, NewProject, NewTask, NewUser, ProjectService, SessionGateway,
    TaskPatch, TaskPriority, TaskService, TaskStatus, UserId, UserService,
};

struct Fixture {
    gateway: SessionGateway,
    projects: ProjectService<MemStore>,
    tasks: TaskService<MemStore>,
    owner: UserId,
    member: UserId,
}

fn fixture() -> Fixture {
    let store = MemStore::new();
    let gateway = SessionGateway::new();
    let users = UserService::new(store.clone());
    let projects = ProjectService::new(store.clone(), gateway.clone());
    let tasks = TaskService::new(store, gateway.clone());

    let owner = users
        .register_user(NewUser {
            email: "owner@example.com".to_string(),
            handle: "owner".to_string(),
            avatar_url: None,
        })
        .unwrap()
        .id;
    let member = users
        .register_user(NewUser {
            email: "member@example.com".to_string(),
            handle: "member".to_string(),
            avatar_url: None,
        })
        .unwrap()
        .id;

    Fixture {
        gateway,
        projects,
        tasks,
        owner,
        member,
    }
}

fn new_task(title: &str, assignee: UserId) -> NewTask {
    NewTask {
        title: title.to_string(),
        description: String::new(),
        priority: None,
        due_at: 1_700_000_000_000,
        assigned_to: assignee,
    }
}

#[test]
fn two_watching_clients_converge_after_a_priority_update() {
    let f = fixture();
    let project = f
        .projects
        .create_project(
            f.owner,
            NewProject {
                name: "project-42".to_string(),
                description: String::new(),
            },
        )
        .unwrap();
    f.projects.add_member(f.owner, project.id, f.member).unwrap();
    let task = f
        .tasks
        .create_task(f.member, project.id, new_task("shared", f.owner))
        .unwrap();

    // Session A belongs to the owner, session B to the member.
    let mut session_a = f.gateway.connect();
    let mut session_b = f.gateway.connect();
    f.gateway.join(session_a.id(), project.id);
    f.gateway.join(session_b.id(), project.id);

    let mut cache_a = ClientCache::new(f.projects.clone(), f.owner);
    let mut cache_b = ClientCache::new(f.projects.clone(), f.member);
    cache_a.load_project_tasks(project.id).unwrap();
    cache_b.load_project_tasks(project.id).unwrap();

    f.tasks
        .update_task(
            f.owner,
            task.id,
            TaskPatch {
                priority: Some(TaskPriority::High),
                ..TaskPatch::default()
            },
        )
        .unwrap();

    let event_a = session_a.try_next().expect("session A receives the update");
    let event_b = session_b.try_next().expect("session B receives the update");
    assert_eq!(event_a, event_b);

    cache_a.apply_event(&event_a).unwrap();
    cache_b.apply_event(&event_b).unwrap();

    assert_eq!(cache_a.tasks_for(project.id), cache_b.tasks_for(project.id));
    assert_eq!(
        cache_a.tasks_for(project.id)[0].priority,
        TaskPriority::High
    );
}

#[test]
fn reapplying_the_same_event_is_idempotent() {
    let f = fixture();
    let project = f
        .projects
        .create_project(
            f.owner,
            NewProject {
                name: "p".to_string(),
                description: String::new(),
            },
        )
        .unwrap();
    let task = f
        .tasks
        .create_task(f.owner, project.id, new_task("t", f.owner))
        .unwrap();

    let mut session = f.gateway.connect();
    f.gateway.join(session.id(), project.id);
    f.tasks
        .update_task(
            f.owner,
            task.id,
            TaskPatch {
                status: Some(TaskStatus::InProgress),
                ..TaskPatch::default()
            },
        )
        .unwrap();
    let event = session.try_next().unwrap();

    let mut cache = ClientCache::new(f.projects.clone(), f.owner);
    cache.apply_event(&event).unwrap();
    let after_first = cache.tasks_for(project.id).to_vec();

    cache.apply_event(&event).unwrap();
    assert_eq!(cache.tasks_for(project.id), after_first.as_slice());
}

#[test]
fn rest_confirmed_write_plus_echo_never_duplicates() {
    let f = fixture();
    let project = f
        .projects
        .create_project(
            f.owner,
            NewProject {
                name: "p".to_string(),
                description: String::new(),
            },
        )
        .unwrap();

    let mut session = f.gateway.connect();
    f.gateway.join(session.id(), project.id);

    let mut cache = ClientCache::new(f.projects.clone(), f.owner);
    cache.load_projects().unwrap();

    // The acting client merges its REST response first, then its own echo
    // arrives and triggers the refetch.
    let task = f
        .tasks
        .create_task(f.owner, project.id, new_task("once", f.owner))
        .unwrap();
    cache.record_task(task.clone());
    assert_eq!(cache.tasks_for(project.id).len(), 1);

    let echo = session.try_next().unwrap();
    cache.apply_event(&echo).unwrap();
    assert_eq!(cache.tasks_for(project.id).len(), 1);
    assert_eq!(cache.tasks_for(project.id)[0].id, task.id);
}

#[test]
fn comment_events_surface_as_task_updates_and_refetch_the_thread() {
    let f = fixture();
    let project = f
        .projects
        .create_project(
            f.owner,
            NewProject {
                name: "p".to_string(),
                description: String::new(),
            },
        )
        .unwrap();
    let task = f
        .tasks
        .create_task(f.owner, project.id, new_task("discussed", f.owner))
        .unwrap();

    let mut session = f.gateway.connect();
    f.gateway.join(session.id(), project.id);

    let mut cache = ClientCache::new(f.projects.clone(), f.owner);
    cache.load_project_tasks(project.id).unwrap();
    assert!(cache.tasks_for(project.id)[0].comments.is_empty());

    f.tasks.add_comment(f.owner, task.id, "first note").unwrap();
    let event = session.try_next().unwrap();
    cache.apply_event(&event).unwrap();

    let cached = &cache.tasks_for(project.id)[0];
    assert_eq!(cached.comments.len(), 1);
    assert_eq!(cached.comments[0].text, "first note");
}

#[test]
fn board_projection_tracks_the_reconciled_collection() {
    let f = fixture();
    let project = f
        .projects
        .create_project(
            f.owner,
            NewProject {
                name: "kanban".to_string(),
                description: String::new(),
            },
        )
        .unwrap();
    let task = f
        .tasks
        .create_task(f.owner, project.id, new_task("card", f.owner))
        .unwrap();

    let mut session = f.gateway.connect();
    f.gateway.join(session.id(), project.id);

    let mut cache = ClientCache::new(f.projects.clone(), f.owner);
    cache.load_project_tasks(project.id).unwrap();
    assert_eq!(cache.board(project.id).todo.len(), 1);
    assert_eq!(cache.board(project.id).done.len(), 0);

    f.tasks
        .update_task(
            f.owner,
            task.id,
            TaskPatch {
                status: Some(TaskStatus::Done),
                ..TaskPatch::default()
            },
        )
        .unwrap();
    let event = session.try_next().unwrap();
    cache.apply_event(&event).unwrap();

    let board = cache.board(project.id);
    assert_eq!(board.todo.len(), 0);
    assert_eq!(board.done.len(), 1);
    assert_eq!(board.done[0].id, task.id);
}
