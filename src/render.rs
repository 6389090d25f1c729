// src/render.rs

//! Deterministic rendering of a build configuration into shell commands.
//!
//! [`render_command_sequence`] is a pure function: no I/O, no side effects,
//! identical output for identical input. It never fails; the caller guarantees
//! the configuration is valid by construction.

use crate::config::BuildConfig;

/// Produce the ordered shell command sequence for one build.
///
/// Fixed topology:
/// 1. create the working directory tree
/// 2. debootstrap a minimal root filesystem into `<workdir>/chroot`
/// 3. write the hostname into the bootstrapped filesystem
/// 4. enter the chroot and install the base toolset, kernel, and firmware
/// 5. `lb config` with architecture, components, boot append, secure boot
/// 6. a second `lb config` carrying package-selection flags (only when the
///    selection is non-empty)
/// 7. `lb build`
/// 8. copy the hybrid ISO artifact into the working directory
pub fn render_command_sequence(config: &BuildConfig) -> Vec<String> {
    let workdir = config.workdir().display();
    let arch = config.architecture();
    let components = config.components().join(" ");
    let firmware = config.firmware_packages().join(" ");

    let chroot_script = format!(
        "sudo chroot {workdir}/chroot /bin/bash -c \"\"\n\
         apt-get update && \\\n\
         apt-get install -y --no-install-recommends tasksel systemd-sysv && \\\n\
         tasksel install standard && \\\n\
         apt-get install -y linux-image-{arch} live-build squashfs-tools xorriso {firmware}\n\
         \"\""
    );

    let mut lb_config_parts = vec![
        "sudo lb config -d sid".to_string(),
        format!("--architectures {arch}"),
        "--binary-images iso-hybrid".to_string(),
        format!("--archive-areas '{components}'"),
        format!(
            "--bootappend-live 'boot=live components quiet username={}'",
            config.username()
        ),
    ];
    if config.enable_secure_boot() {
        lb_config_parts.push("--uefi-secure-boot on".to_string());
    }

    let mut commands = vec![
        format!("mkdir -p {workdir}/work"),
        format!(
            "sudo debootstrap --arch={arch} --variant={variant} sid {workdir}/chroot {mirror}",
            variant = config.variant(),
            mirror = config.mirror(),
        ),
        format!(
            "echo '{hostname}' | sudo tee {workdir}/chroot/etc/hostname",
            hostname = config.hostname(),
        ),
        chroot_script,
        lb_config_parts.join(" "),
    ];

    let package_flags = config.package_selection().to_flags();
    if !package_flags.is_empty() {
        commands.push(format!("sudo lb config {}", package_flags.join(" ")));
    }

    commands.push("sudo lb build".to_string());
    commands.push(format!(
        "sudo cp live-image-{arch}.hybrid.iso {workdir}/sid-custom.iso"
    ));

    // Drop anything that rendered empty; the runner counts steps by index.
    commands.retain(|command| !command.is_empty());
    commands
}
