use std::{
    env, fs,
    io::{self, Write},
    process::ExitCode,
};

use armasm::{Assembly, Condition, DataSize, Emitter, OffsetKind, Operand2Shift, Register::*};
use tracing_subscriber::EnvFilter;

/// GBA I/O register base.
const IO_BASE: u32 = 0x0400_0000;
const VRAM_BASE: u32 = 0x0600_0000;

fn main() -> ExitCode {
    // Dropped when `main` returns, flushing queued lines. No `process::exit` past this point.
    let (writer, _guard) = tracing_appender::non_blocking(io::stderr());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .init();

    tracing::info!("armlet v0.1.0");

    ExitCode::from(run(env::args().nth(1).as_deref(), &mut io::stdout()))
}

/// Writes the demo listing to `output`, or to `stdout` when no path is given.
///
/// Returns the process exit code: 1 for an invalid program, 2 for an I/O failure.
fn run(output: Option<&str>, stdout: &mut impl Write) -> u8 {
    let listing = match demo().listing() {
        Ok(listing) => listing,
        Err(e) => {
            tracing::error!("invalid program: {e}");
            return 1;
        }
    };

    match output {
        Some(path) => {
            if let Err(e) = fs::write(path, &listing) {
                tracing::error!("cannot write {path}: {e}");
                return 2;
            }
            tracing::info!("listing written to {path}");
        }
        None => {
            if let Err(e) = stdout.write_all(listing.as_bytes()) {
                tracing::error!("cannot write listing: {e}");
                return 2;
            }
        }
    }

    0
}

/// Mode 3 screen fill: enables BG2 in bitmap mode and paints VRAM.
fn demo() -> Assembly {
    let mut assembly = Assembly::new();
    let mut e = Emitter::new(&mut assembly);

    e.data_member("color", 0x7C00);
    e.global_label("main");
    e.push([R4, R5, LR]).emit();

    e.comment("DISPCNT = mode 3, BG2 on");
    e.set_byte(IO_BASE, 0x03);
    e.set_byte(IO_BASE + 1, 0x04);

    e.move_(R0, VRAM_BASE).emit();
    e.move_(R1, 240 * 160 / 2).emit();
    e.comment("two pixels per word");
    e.move_(R2, 0x7C00).emit();
    e.or(R2, R2, R2).shift(Operand2Shift::lsl(16)).emit();
    e.label("fill");
    e.store_register(R2, R0)
        .offset(4)
        .offset_kind(OffsetKind::PostIndexed)
        .emit();
    e.subtract_assign(R1, 1).update_flags(true).emit();
    e.branch("fill").condition(Condition::NE).emit();

    e.comment("checksum of the first row");
    e.move_(R4, VRAM_BASE).emit();
    e.move_(R5, 0).emit();
    e.load_register(R3, R4).data_size(DataSize::Byte).emit();
    e.add_assign(R5, R3).shift(Operand2Shift::lsl(1)).emit();
    e.exclusive_or(R5, R5, R5).condition(Condition::VS).emit();

    e.pop([R4, R5, PC]).emit();

    assembly
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn demo_validates() {
        let assembly = demo();
        assert_eq!(assembly.validate(), Ok(()));

        let listing = assembly.listing().unwrap();
        assert!(listing.starts_with(".data\ncolor: .word 31744\n\n.text\n.global main\n"));
        assert!(listing.contains("    STR R2, [R0], #4\n    SUBS R1, R1, #1\n    BNE fill\n"));
        assert!(listing.ends_with("    EORVS R5, R5, R5\n    POP {R4, R5, PC}\n"));
    }

    #[test]
    fn stdout_carries_only_the_listing() {
        let mut stdout = Vec::new();
        assert_eq!(run(None, &mut stdout), 0);
        assert_eq!(
            String::from_utf8(stdout).unwrap(),
            demo().listing().unwrap()
        );
    }

    #[test]
    fn unwritable_path_fails_with_code_2() {
        let mut stdout = Vec::new();
        assert_eq!(run(Some("/nonexistent_dir/out.s"), &mut stdout), 2);
        assert!(stdout.is_empty());
    }
}
