use sid_iso_builder::config::{Architecture, BuildConfig, PackageSelection};
use sid_iso_builder::render::render_command_sequence;

fn base_config() -> BuildConfig {
    BuildConfig::default().with_workdir("/tmp/sid-build")
}

#[test]
fn every_architecture_appears_in_flags_and_artifact_name() {
    for &arch in Architecture::ALL {
        let commands = render_command_sequence(&base_config().with_architecture(arch));

        let flag = format!("--architectures {arch}");
        assert_eq!(
            commands.iter().filter(|cmd| cmd.contains(&flag)).count(),
            1,
            "expected exactly one --architectures command for {arch}"
        );

        let artifact = format!("live-image-{arch}.hybrid.iso");
        assert!(
            commands.last().is_some_and(|cmd| cmd.contains(&artifact)),
            "final copy command should name {artifact}"
        );
    }
}

#[test]
fn secure_boot_flag_is_rendered_exactly_when_enabled() {
    let enabled = render_command_sequence(&base_config().with_secure_boot(true));
    assert_eq!(
        enabled
            .iter()
            .filter(|cmd| cmd.contains("--uefi-secure-boot on"))
            .count(),
        1
    );

    let disabled = render_command_sequence(&base_config().with_secure_boot(false));
    assert!(
        disabled
            .iter()
            .all(|cmd| !cmd.contains("--uefi-secure-boot"))
    );
}

#[test]
fn empty_selection_renders_no_package_command() {
    let commands = render_command_sequence(&base_config());
    assert!(
        commands
            .iter()
            .all(|cmd| !cmd.contains("--include=") && !cmd.contains("--tasksel="))
    );
    assert_eq!(commands.len(), 7);
}

#[test]
fn selection_renders_one_package_command_in_order() {
    let selection = PackageSelection::from_csv("curl, git", "standard, desktop");
    let commands = render_command_sequence(&base_config().with_package_selection(selection));
    assert_eq!(commands.len(), 8);

    let package_commands: Vec<&String> = commands
        .iter()
        .filter(|cmd| cmd.contains("--include=") || cmd.contains("--tasksel="))
        .collect();
    assert_eq!(package_commands.len(), 1);
    assert_eq!(
        package_commands[0],
        "sudo lb config --include=curl git --tasksel=standard --tasksel=desktop"
    );
}

#[test]
fn sequence_has_fixed_topology() {
    let config = base_config();
    let commands = render_command_sequence(&config);

    assert_eq!(commands[0], "mkdir -p /tmp/sid-build/work");
    assert_eq!(
        commands[1],
        "sudo debootstrap --arch=amd64 --variant=standard sid /tmp/sid-build/chroot \
         http://deb.debian.org/debian"
    );
    assert_eq!(
        commands[2],
        "echo 'sid-builder' | sudo tee /tmp/sid-build/chroot/etc/hostname"
    );
    assert!(commands[3].starts_with("sudo chroot /tmp/sid-build/chroot /bin/bash"));
    assert!(commands[3].contains("linux-image-amd64"));
    assert!(commands[3].contains("firmware-linux"));
    assert!(commands[4].starts_with("sudo lb config -d sid"));
    assert!(commands[4].contains("--binary-images iso-hybrid"));
    assert!(commands[4].contains("--archive-areas 'main contrib non-free-firmware'"));
    assert!(commands[4].contains("--bootappend-live 'boot=live components quiet username=sid'"));
    assert_eq!(commands[5], "sudo lb build");
    assert_eq!(
        commands[6],
        "sudo cp live-image-amd64.hybrid.iso /tmp/sid-build/sid-custom.iso"
    );
}

#[test]
fn mirror_and_hostname_are_substituted() -> Result<(), Box<dyn std::error::Error>> {
    let config = base_config()
        .with_mirror("http://mirror.example.org/debian")?
        .with_hostname("livebox")?
        .with_username("visitor")?;
    let commands = render_command_sequence(&config);

    assert!(
        commands
            .iter()
            .any(|cmd| cmd.contains("http://mirror.example.org/debian"))
    );
    assert!(commands.iter().any(|cmd| cmd.contains("echo 'livebox'")));
    assert!(commands.iter().any(|cmd| cmd.contains("username=visitor'")));
    Ok(())
}

#[test]
fn rendering_is_deterministic() {
    let config = base_config().with_package_selection(PackageSelection::from_csv("htop", ""));
    assert_eq!(
        render_command_sequence(&config),
        render_command_sequence(&config)
    );
    assert!(render_command_sequence(&config).iter().all(|cmd| !cmd.is_empty()));
}
