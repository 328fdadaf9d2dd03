/// Terminal navigator
use teamspace_core::{NavigationIntent, NavigationState};
use teamspace_session::Navigator;

/// Prints each navigation request instead of switching screens
pub struct PrintNavigator;

impl Navigator for PrintNavigator {
    fn goto(&self, intent: NavigationIntent) {
        println!("{}", describe(&intent));
    }
}

fn describe(intent: &NavigationIntent) -> String {
    match &intent.state {
        Some(NavigationState::Project { project }) => format!(
            "-> {} ({}, {} collaborator(s))",
            intent.path,
            project.name,
            project.collaborator_count()
        ),
        None => format!("-> {}", intent.path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teamspace_core::{Project, ResourceId};

    #[test]
    fn test_describe_plain_route() {
        assert_eq!(describe(&NavigationIntent::login()), "-> /login");
    }

    #[test]
    fn test_describe_project_route() {
        let project = Project::new(ResourceId::from("p1"), "Demo");
        assert_eq!(
            describe(&NavigationIntent::project(project)),
            "-> /project (Demo, 0 collaborator(s))"
        );
    }
}
