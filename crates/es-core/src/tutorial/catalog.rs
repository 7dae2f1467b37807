use serde::Serialize;

use crate::environment::EnvironmentName;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TutorialCategory {
    Environment,
    Git,
    Deployment,
}

impl TutorialCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TutorialCategory::Environment => "environment",
            TutorialCategory::Git => "git",
            TutorialCategory::Deployment => "deployment",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            TutorialCategory::Environment => "🌍",
            TutorialCategory::Git => "🔧",
            TutorialCategory::Deployment => "🚀",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TutorialDifficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl TutorialDifficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            TutorialDifficulty::Beginner => "beginner",
            TutorialDifficulty::Intermediate => "intermediate",
            TutorialDifficulty::Advanced => "advanced",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepType {
    Instruction,
    Command,
    Exercise,
    Validation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationKind {
    FileExists,
    CommandOutput,
    EnvironmentCheck,
    ManualConfirm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRule {
    #[serde(rename = "type")]
    pub kind: ValidationKind,
    pub target: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Command {
    pub command: &'static str,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<EnvironmentName>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorialStep {
    pub id: &'static str,
    pub title: &'static str,
    pub content: &'static str,
    #[serde(rename = "type")]
    pub step_type: StepType,
    pub commands: &'static [Command],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRule>,
    pub tips: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tutorial {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub category: TutorialCategory,
    pub difficulty: TutorialDifficulty,
    /// Minutes.
    pub estimated_time: u32,
    pub tags: &'static [&'static str],
    pub steps: &'static [TutorialStep],
}

impl Tutorial {
    pub fn step_index(&self, step_id: &str) -> Option<usize> {
        self.steps.iter().position(|s| s.id == step_id)
    }
}

const fn cmd(command: &'static str, description: &'static str) -> Command {
    Command {
        command,
        description,
        environment: None,
    }
}

const fn env_cmd(
    command: &'static str,
    description: &'static str,
    environment: EnvironmentName,
) -> Command {
    Command {
        command,
        description,
        environment: Some(environment),
    }
}

const fn instruction(
    id: &'static str,
    title: &'static str,
    content: &'static str,
    commands: &'static [Command],
    tips: &'static [&'static str],
) -> TutorialStep {
    TutorialStep {
        id,
        title,
        content,
        step_type: StepType::Instruction,
        commands,
        validation: None,
        tips,
    }
}

const fn command_step(
    id: &'static str,
    title: &'static str,
    content: &'static str,
    commands: &'static [Command],
    tips: &'static [&'static str],
) -> TutorialStep {
    TutorialStep {
        id,
        title,
        content,
        step_type: StepType::Command,
        commands,
        validation: None,
        tips,
    }
}

static TUTORIALS: [Tutorial; 3] = [
    Tutorial {
        id: "environment-basics",
        title: "Environment Basics",
        description: "Learn how the application adapts to each environment and how environment-driven development works.",
        category: TutorialCategory::Environment,
        difficulty: TutorialDifficulty::Beginner,
        estimated_time: 15,
        tags: &["environment", "config", "basics"],
        steps: &[
            instruction(
                "intro",
                "Understanding Environments",
                "The application runs in one of four environments: local, dev, test and prod. \
                 Colours, enabled features and available views all follow from that choice.",
                &[],
                &[
                    "The banner shows the active environment",
                    "Feature flags are derived from the environment alone",
                ],
            ),
            instruction(
                "check-current-env",
                "Check Your Current Environment",
                "Look at the banner: LOCAL is blue, DEVELOPMENT green, TEST yellow and PRODUCTION red.",
                &[],
                &["The debug panel lists every feature flag"],
            ),
            command_step(
                "switch-environment",
                "Switch Between Environments",
                "Restart the application with a different environment selected.",
                &[
                    env_cmd("npm run dev", "Start in the local environment (default)", EnvironmentName::Local),
                    env_cmd("npm run dev:development", "Start in the development environment", EnvironmentName::Dev),
                    env_cmd("npm run dev:test", "Start in the test environment", EnvironmentName::Test),
                ],
                &["Stop the running server before starting another one"],
            ),
            instruction(
                "observe-differences",
                "Observe Environment Differences",
                "Compare the banner, the debug panel and the feature list between environments. \
                 Production hides the debug panel and turns on analytics.",
                &[],
                &["Each environment has its own .env file"],
            ),
            instruction(
                "understand-config",
                "Understanding Configuration",
                "One variable selects the environment; a static table maps it to a display name, \
                 banner colours and six feature flags.",
                &[
                    cmd("cat .env.development", "View development environment variables"),
                    cmd("cat .env.production", "View production environment variables"),
                ],
                &["Unknown environment names fall back to local"],
            ),
            TutorialStep {
                id: "practice-exercise",
                title: "Practice Exercise",
                content: "Write a journal entry in development, another in test, then switch to local \
                          and confirm both entries are still listed with their environment stamps.",
                step_type: StepType::Exercise,
                commands: &[],
                validation: Some(ValidationRule {
                    kind: ValidationKind::ManualConfirm,
                    target: "exercise-completion",
                    message: "Have you completed the exercise by creating entries in different environments?",
                }),
                tips: &["Entries persist across environment switches"],
            },
        ],
    },
    Tutorial {
        id: "git-workflow",
        title: "Git Workflow & Branch Management",
        description: "Practise the branch workflow used to move changes from local development to production.",
        category: TutorialCategory::Git,
        difficulty: TutorialDifficulty::Intermediate,
        estimated_time: 25,
        tags: &["git", "workflow", "branches", "deployment"],
        steps: &[
            instruction(
                "git-setup",
                "Git Workflow Overview",
                "Feature branches start from develop, merge back through pull requests, and develop \
                 is promoted to main for production releases.",
                &[],
                &["develop deploys to dev, main deploys to prod"],
            ),
            command_step(
                "check-git-status",
                "Check Current Git Status",
                "Inspect the current branch and recent history before starting work.",
                &[
                    cmd("git status", "Check current branch and working tree status"),
                    cmd("git branch -a", "List all branches (local and remote)"),
                    cmd("git log --oneline -5", "Show recent commits"),
                ],
                &["Start from a clean working tree"],
            ),
            command_step(
                "create-feature-branch",
                "Create a Feature Branch",
                "Branch off the latest develop.",
                &[
                    cmd("git checkout develop", "Switch to develop branch"),
                    cmd("git pull origin develop", "Get latest changes from develop"),
                    cmd("git checkout -b feature/learning-system-test", "Create and switch to a feature branch"),
                ],
                &["Use the feature/ prefix for feature branches"],
            ),
            command_step(
                "make-changes",
                "Make and Test Changes",
                "Commit a small change on the feature branch.",
                &[
                    cmd("git add src/App.tsx", "Stage the changes"),
                    cmd("git commit -m \"Add learning system test comment\"", "Commit the changes"),
                ],
                &["Keep commits small and focused"],
            ),
            command_step(
                "push-and-pr",
                "Push Branch and Create PR",
                "Publish the branch and open a pull request against develop.",
                &[
                    cmd("git push -u origin feature/learning-system-test", "Push feature branch to remote"),
                    cmd(
                        "gh pr create --title \"Add learning system test\" --base develop",
                        "Create a PR to develop using the GitHub CLI",
                    ),
                ],
                &["Target develop, not main"],
            ),
            instruction(
                "merge-workflow",
                "Merge and Deployment Workflow",
                "After review the PR merges into develop and deploys to dev. Clean up the branch afterwards.",
                &[
                    cmd("git checkout develop", "Switch back to develop branch"),
                    cmd("git branch -d feature/learning-system-test", "Delete the feature branch locally"),
                    cmd("git push origin --delete feature/learning-system-test", "Delete the feature branch from remote"),
                ],
                &[],
            ),
            instruction(
                "hotfix-workflow",
                "Hotfix Workflow",
                "Critical production fixes branch from main and are merged back into both main and develop.",
                &[
                    cmd("git checkout main", "Switch to main branch"),
                    cmd("git checkout -b hotfix/critical-fix", "Create hotfix branch from main"),
                ],
                &["Keep hotfix changes minimal", "Always merge hotfixes back to develop"],
            ),
        ],
    },
    Tutorial {
        id: "deployment-pipeline",
        title: "Deployment Pipeline & CI/CD",
        description: "Follow code from a merged pull request to a production deployment.",
        category: TutorialCategory::Deployment,
        difficulty: TutorialDifficulty::Advanced,
        estimated_time: 30,
        tags: &["deployment", "cicd", "pipeline", "automation"],
        steps: &[
            instruction(
                "pipeline-overview",
                "Understanding the Deployment Pipeline",
                "Pushes to develop deploy to dev, pushes to the test branch deploy to test, and \
                 merges to main deploy to production.",
                &[],
                &[],
            ),
            command_step(
                "examine-workflows",
                "Examine GitHub Actions Workflows",
                "Each target environment has its own workflow file.",
                &[
                    cmd("ls -la .github/workflows/", "List all workflow files"),
                    cmd("cat .github/workflows/deploy-production.yml", "View production deployment workflow"),
                    cmd("cat .github/workflows/deploy-test.yml", "View test deployment workflow"),
                ],
                &[],
            ),
            command_step(
                "build-commands",
                "Environment-Specific Build Commands",
                "Builds bake the environment in at build time.",
                &[
                    env_cmd("npm run build:development", "Build for development", EnvironmentName::Dev),
                    env_cmd("npm run build:test", "Build for test", EnvironmentName::Test),
                    env_cmd("npm run build:production", "Build for production", EnvironmentName::Prod),
                ],
                &["A build cannot switch environment at runtime"],
            ),
            instruction(
                "environment-variables",
                "Managing Environment Variables",
                "Keep per-environment values in separate files and never commit secrets.",
                &[
                    cmd("cat .env.example", "View example environment variables"),
                    cmd("cat .env.production", "View production environment variables"),
                ],
                &[],
            ),
            instruction(
                "deployment-process",
                "Deployment Process Walkthrough",
                "A release moves develop to test for verification, then main to production.",
                &[],
                &["Verify in test before promoting"],
            ),
            instruction(
                "monitoring-deployments",
                "Monitoring and Rollback",
                "Watch metrics after a release and revert quickly when something regresses.",
                &[
                    cmd("git log --oneline -10", "View recent commits for rollback reference"),
                    cmd("git revert HEAD --no-edit", "Revert the last commit"),
                ],
                &["Prefer revert over reset on shared branches"],
            ),
            instruction(
                "deployment-best-practices",
                "Deployment Best Practices",
                "Deploy small changes often, automate checks, and keep a rollback plan ready.",
                &[],
                &["Communicate deployment status to your team"],
            ),
        ],
    },
];

pub fn all_tutorials() -> &'static [Tutorial] {
    &TUTORIALS
}

pub fn tutorial_by_id(id: &str) -> Option<&'static Tutorial> {
    TUTORIALS.iter().find(|t| t.id == id)
}

pub fn tutorials_by_category(category: TutorialCategory) -> Vec<&'static Tutorial> {
    TUTORIALS.iter().filter(|t| t.category == category).collect()
}

pub fn tutorials_by_difficulty(difficulty: TutorialDifficulty) -> Vec<&'static Tutorial> {
    TUTORIALS.iter().filter(|t| t.difficulty == difficulty).collect()
}
