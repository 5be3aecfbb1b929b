//! Install integration tests

mod common;

use common::{TestHost, mode_of};
use predicates::prelude::*;

const MANIFEST: &str = "barclamp:\n  name: dns\ncrowbar:\n  layout: 2\napplication_sass:\n  add: top\n";

fn dns_package(host: &TestHost) -> std::path::PathBuf {
    let package = host.create_package("dns", MANIFEST);
    host.write_file(
        &package.join("crowbar_framework/app/models/dns_service.rb"),
        "class DnsService < ServiceObject\nend\n",
    );
    host.write_file(
        &package.join("crowbar_framework/app/assets/stylesheets/_dns.sass"),
        ".dns\n",
    );
    host.write_file(&package.join("crowbar_framework/.hidden"), "skip");
    host.write_file(&package.join("bin/dns-tool"), "#!/bin/sh\n");
    host.write_file(&package.join("doc/README.md"), "# DNS\n");
    host.write_file(
        &package.join("chef/data_bags/crowbar/bc-template-dns.json"),
        "{}",
    );
    package
}

#[test]
fn test_install_copies_files_and_records_them() {
    let host = TestHost::new();
    host.write_file(
        &host.application_sass(),
        "// styles\n@import reset\n// top of import list\n@import layout\n",
    );
    let package = dns_package(&host);

    host.cmd()
        .arg("install")
        .arg(&package)
        .assert()
        .success()
        .stdout(predicate::str::contains("Installed"))
        .stdout(predicate::str::contains("dns"));

    let model = host.crowbar_path().join("app/models/dns_service.rb");
    assert_eq!(host.read_file(&model), "class DnsService < ServiceObject\nend\n");
    assert!(!host.crowbar_path().join(".hidden").exists());
    assert_eq!(mode_of(&host.base.join("bin/dns-tool")), 0o755);
    assert!(host.base.join("doc/dns/README.md").is_file());

    let filelist = host.read_file(&host.filelist("dns"));
    assert!(filelist.contains(&model.display().to_string()));
    assert!(filelist.contains(&host.base.join("doc/dns/README.md").display().to_string()));

    assert_eq!(
        host.read_file(&host.application_sass()),
        "// styles\n@import reset\n// top of import list\n@import dns\n@import layout\n"
    );
    assert!(host.crowbar_path().join("barclamps/dns.yml").is_file());
    assert!(host
        .crowbar_path()
        .join("barclamps/templates/bc-template-dns.json")
        .is_file());
}

#[test]
fn test_install_runs_actions_in_order_with_environment() {
    let host = TestHost::new();
    let package = host.create_package("dns", MANIFEST);
    let trace = host.temp.path().join("trace");
    for name in ["a.install", "2.install", "10.install"] {
        host.write_script(
            &package.join("setup").join(name),
            &format!(
                "echo \"{name} $CROWBAR_DIR $BC_PATH\" >> {}",
                trace.display()
            ),
        );
    }

    host.cmd().arg("install").arg(&package).assert().success();

    let lines: Vec<String> = host.read_file(&trace).lines().map(String::from).collect();
    let suffix = format!("{} {}", host.base.display(), package.display());
    assert_eq!(
        lines,
        vec![
            format!("10.install {suffix}"),
            format!("2.install {suffix}"),
            format!("a.install {suffix}"),
        ]
    );
}

#[test]
fn test_failing_action_aborts_and_reports_output() {
    let host = TestHost::new();
    let package = host.create_package("dns", MANIFEST);
    let marker = host.temp.path().join("later-ran");
    host.write_script(
        &package.join("setup/10-fail.install"),
        "echo 'bind9 not available' >&2\nexit 3",
    );
    host.write_script(
        &package.join("setup/20-later.install"),
        &format!("touch {}", marker.display()),
    );

    host.cmd()
        .arg("install")
        .arg(&package)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("10-fail.install failed for dns"))
        .stderr(predicate::str::contains("bind9 not available"));

    assert!(!marker.exists());
    let log = host.root.join("var/log/barclamps/dns-10-fail.install.log");
    assert!(host.read_file(&log).contains("bind9 not available"));
}

#[test]
fn test_install_without_actions() {
    let host = TestHost::new();
    let package = host.create_package("dns", MANIFEST);
    let marker = host.temp.path().join("ran");
    host.write_script(
        &package.join("setup/10-touch.install"),
        &format!("touch {}", marker.display()),
    );

    host.cmd()
        .arg("install")
        .arg(&package)
        .arg("--no-install-actions")
        .assert()
        .success();

    assert!(!marker.exists());
    assert!(host.base.join("setup/dns/10-touch.install").is_file());
}

#[test]
fn test_deploy_skips_application_components() {
    let host = TestHost::new();
    let package = dns_package(&host);
    host.write_file(&package.join("cache/files/boot.img"), "img");

    host.cmd()
        .arg("install")
        .arg(&package)
        .arg("--deploy")
        .assert()
        .success();

    assert!(!host.base.join("bin/dns-tool").exists());
    assert!(!host.filelist("dns").exists());
    assert_eq!(host.read_file(&host.root.join("tftpboot/files/boot.img")), "img");
}

#[test]
fn test_debug_logging_goes_to_stderr() {
    let host = TestHost::new();
    let package = host.create_package("dns", MANIFEST);

    host.cmd()
        .arg("install")
        .arg(&package)
        .arg("--debug")
        .assert()
        .success()
        .stderr(predicate::str::contains("installing barclamp dns"));
}
