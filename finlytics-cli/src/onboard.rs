use anyhow::{Result, bail};
use finlytics_core::onboard::is_valid_email;
use finlytics_core::{OnboardError, Profile, ProfileDraft, Role, Step, Wizard};
use std::io::{BufRead, Write};

fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, label: &str) -> Result<String> {
    write!(out, "{}: ", label)?;
    out.flush().ok();
    let mut s = String::new();
    if input.read_line(&mut s)? == 0 {
        bail!("input closed during onboarding");
    }
    Ok(s.trim().to_string())
}

fn prompt_name<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<String> {
    loop {
        let name = prompt(input, out, "Before we get started, what should we call you?")?;
        if name.chars().count() > 1 {
            return Ok(name);
        }
        writeln!(out, "{}", OnboardError::NameTooShort)?;
    }
}

fn prompt_role<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Role> {
    writeln!(out, "What is your role?")?;
    for (i, r) in Role::ALL.iter().enumerate() {
        writeln!(out, "  {}) {}", i + 1, r)?;
    }
    loop {
        match prompt(input, out, "Role")?.parse::<Role>() {
            Ok(role) => return Ok(role),
            Err(e) => writeln!(out, "{e}")?,
        }
    }
}

fn prompt_email<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<String> {
    loop {
        let email = prompt(input, out, "Email address")?;
        if is_valid_email(&email) {
            return Ok(email);
        }
        writeln!(out, "{}", OnboardError::InvalidEmail)?;
    }
}

fn print_page<W: Write>(out: &mut W, step: Step) -> Result<()> {
    writeln!(out, "\n# {}\n", step.title())?;
    for line in step.body() {
        writeln!(out, "  {line}")?;
    }
    writeln!(out, "\n{}", step.progress_label())?;
    Ok(())
}

/// Walk the six tutorial steps, returning the captured profile.
pub fn run_onboarding<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Profile> {
    let mut wizard = Wizard::new();

    loop {
        let step = wizard.step();
        print_page(out, step)?;

        match step {
            Step::Profile => {
                let draft = ProfileDraft {
                    full_name: prompt_name(input, out)?,
                    role: Some(prompt_role(input, out)?),
                    email: prompt_email(input, out)?,
                };
                wizard.submit_profile(&draft)?;
            }
            Step::Ready => {
                writeln!(out, "\n{}", wizard.greeting())?;
                writeln!(
                    out,
                    "Run `finlytics parse <statement>` to upload your first bank statement."
                )?;
                break;
            }
            _ => {
                let answer = prompt(input, out, "[Enter] next, [b] back")?;
                if answer.eq_ignore_ascii_case("b") {
                    wizard.back();
                } else {
                    wizard.next();
                }
            }
        }
    }

    match wizard.profile() {
        Some(p) => Ok(p.clone()),
        None => bail!("onboarding finished without a profile"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(script: &str) -> (Result<Profile>, String) {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        let res = run_onboarding(&mut input, &mut out);
        (res, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_straight_through() {
        let (res, out) = run("Thandi Nkosi\n3\nthandi@example.com\n\n\n\n\n");
        let profile = res.unwrap();
        assert_eq!(profile.full_name, "Thandi Nkosi");
        assert_eq!(profile.role, Role::BusinessOwner);
        assert_eq!(profile.email, "thandi@example.com");
        assert!(out.contains("Step 6 - 6"));
        assert!(out.contains("You're Ready to Go! Thandi"));
    }

    #[test]
    fn test_invalid_answers_are_reprompted() {
        let (res, out) = run("T\nThandi\nCFO\ndeveloper\nnope\nt@x.io\n\n\n\n\n");
        let profile = res.unwrap();
        assert_eq!(profile.role, Role::Developer);
        assert!(out.contains("full name must be at least 2 characters"));
        assert!(out.contains("unknown role: CFO"));
        assert!(out.contains("please enter a valid email address"));
    }

    #[test]
    fn test_back_returns_to_profile() {
        // step 2 -> back -> re-enter profile -> four pages forward
        let (res, _) = run("Ann Lee\n1\na@b.co\nb\nBo Chen\n2\nbo@c.io\n\n\n\n\n");
        let profile = res.unwrap();
        assert_eq!(profile.full_name, "Bo Chen");
        assert_eq!(profile.role, Role::Bookkeeper);
    }

    #[test]
    fn test_eof_is_an_error() {
        let (res, _) = run("Thandi Nkosi\n");
        assert!(res.is_err());
    }
}
