use super::*;
use crate::config::{FixRule, GenericRule, ManyToOneRule, OneToManyRule, SshRule, SubpackageRule};

fn full_config() -> RewriteConfig {
    RewriteConfig {
        ssh: vec![SshRule {
            old_url: "code.acme.com".to_string(),
            user: "git".to_string(),
        }],
        fix: vec![FixRule {
            old_url: "legacy.acme.com".to_string(),
            new_url: "github.com/acme".to_string(),
            xfix: "-legacy".to_string(),
        }],
        many_to_one: vec![ManyToOneRule {
            old_url: "golang.org/x/".to_string(),
            old_paths: vec!["net".to_string(), "sys".to_string()],
            new_url: "github.com/golang".to_string(),
        }],
        one_to_many: vec![OneToManyRule {
            old_url: "k8s.io/".to_string(),
            new_url: "github.com/kubernetes".to_string(),
            new_paths: vec!["client-go".to_string()],
        }],
        generic: vec![GenericRule {
            package: "gopkg.in".to_string(),
            repo: "gopkg.in".to_string(),
            versioned: true,
        }],
        subpackage: vec![SubpackageRule {
            index: 3,
            markers: vec!["github.com/".to_string()],
        }],
        versioned_host: None,
    }
}

#[test]
fn test_no_rules_is_identity() {
    crate::test_utils::init_test_logging(None);
    let engine = RewriteEngine::from_config(&RewriteConfig::default());
    assert!(engine.is_empty());

    let rewrite = engine.rewrite("github.com/acme/log");
    assert_eq!(rewrite, Rewrite::remote("github.com/acme/log"));
}

#[test]
fn test_unmatched_remote_is_identity() {
    let engine = RewriteEngine::from_config(&full_config());
    assert_eq!(engine.len(), 5);

    let rewrite = engine.rewrite("bitbucket.org/team/repo");
    assert_eq!(rewrite.remote, "bitbucket.org/team/repo");
    assert_eq!(rewrite.branch, None);
}

#[test]
fn test_fix_suffix() {
    let engine = RewriteEngine::from_config(&full_config());
    let rewrite = engine.rewrite("legacy.acme.com/widget");
    assert_eq!(rewrite.remote, "https://github.com/acme/widget-legacy");
    assert_eq!(rewrite.branch, None);
}

#[test]
fn test_user_package_convention() {
    let engine = RewriteEngine::from_config(&full_config());
    let rewrite = engine.rewrite("gopkg.in/user/pkg.v3/sub");
    assert_eq!(rewrite, Rewrite::with_branch("https://gopkg.in/user/pkg", "v3"));
}

#[test]
fn test_ssh_takes_precedence() {
    let mut config = full_config();
    // The fix rule also matches, but SSH is consulted first.
    config.fix[0].old_url = "code.acme.com".to_string();
    let engine = RewriteEngine::from_config(&config);

    let rewrite = engine.rewrite("code.acme.com/team/app");
    assert_eq!(rewrite.remote, "git@git.code.acme.com:team/app.git");
}

#[test]
fn test_first_rule_in_category_wins() {
    let mut config = RewriteConfig::default();
    config.fix.push(FixRule {
        old_url: "legacy.acme.com".to_string(),
        new_url: "first.example".to_string(),
        xfix: "go-".to_string(),
    });
    config.fix.push(FixRule {
        old_url: "legacy.acme.com".to_string(),
        new_url: "second.example".to_string(),
        xfix: "go-".to_string(),
    });
    let engine = RewriteEngine::from_config(&config);
    assert_eq!(engine.rewrite("legacy.acme.com/widget").remote, "https://first.example/go-widget");
}

#[test]
fn test_output_equal_to_input_is_not_a_match() {
    struct Unchanged;
    impl RewriteRule for Unchanged {
        fn category(&self) -> &'static str {
            "unchanged"
        }
        fn try_rewrite(&self, remote: &str) -> Option<Rewrite> {
            Some(Rewrite::with_branch(remote, "main"))
        }
    }

    let mut config = RewriteConfig::default();
    config.generic.push(GenericRule {
        package: "example.org".to_string(),
        repo: "mirror.example.org".to_string(),
        versioned: false,
    });
    let fallback = RewriteEngine::from_config(&config);
    let mut rules: Vec<Box<dyn RewriteRule>> = vec![Box::new(Unchanged)];
    rules.extend(fallback.rules);
    let engine = RewriteEngine::with_rules(rules);

    let rewrite = engine.rewrite("example.org/a/b");
    assert_eq!(rewrite, Rewrite::remote("https://mirror.example.org/a/b"));
}

#[test]
fn test_many_to_one_and_one_to_many_order() {
    let engine = RewriteEngine::from_config(&full_config());
    assert_eq!(engine.rewrite("golang.org/x/net/context").remote, "https://github.com/golang/net");
    assert_eq!(
        engine.rewrite("k8s.io/client-go/kubernetes").remote,
        "https://github.com/kubernetes/client-go"
    );
}

#[test]
fn test_splitter_versioned_path() {
    let splitter = SubpackageSplitter::from_config(&full_config());
    let split = splitter.split("gopkg.in/pkg.v2/foo/bar").unwrap();
    assert_eq!(
        split,
        SplitPath {
            root: "gopkg.in/pkg".to_string(),
            subpackage: "foo/bar".to_string(),
        }
    );
}

#[test]
fn test_custom_rule_in_dispatch_table() {
    struct Mirror;
    impl RewriteRule for Mirror {
        fn category(&self) -> &'static str {
            "mirror"
        }
        fn try_rewrite(&self, remote: &str) -> Option<Rewrite> {
            Some(Rewrite::remote(format!("https://mirror.local/{remote}")))
        }
    }

    let engine = RewriteEngine::with_rules(vec![Box::new(Mirror)]);
    assert_eq!(engine.rewrite("a/b").remote, "https://mirror.local/a/b");
}

#[test]
fn test_https_join_single_separator() {
    assert_eq!(https_join("github.com/acme/", "/widget"), "https://github.com/acme/widget");
    assert_eq!(https_join("github.com/acme", "widget"), "https://github.com/acme/widget");
}
