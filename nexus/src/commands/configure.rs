use crate::context::AppContext;
use crate::format;
use libnexus::Config;
use std::io::Write;
use std::path::Path;
use url::Url;

/// Values given on the command line; missing ones are prompted for
#[derive(Debug, Default)]
pub struct ConfigureArgs {
    pub host: Option<String>,
    pub repository: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Handle the configure command
pub fn handle_configure(ctx: &AppContext, args: ConfigureArgs) {
    let path = ctx.credentials_path.as_path();

    let result = collect_config(args).and_then(|config| write_credentials(path, &config));
    match result {
        Ok(()) => format::success(
            ctx,
            &format!("Credentials written to {}", path.display()),
        ),
        Err(e) => {
            format::error(ctx, &e);
            std::process::exit(1);
        }
    }
}

fn collect_config(args: ConfigureArgs) -> Result<Config, String> {
    let host = prompt_value("Enter Nexus Host: ", args.host)?;
    let repository = prompt_value("Enter Nexus Repository Name: ", args.repository)?;
    let username = prompt_value("Enter Nexus Username: ", args.username)?;
    let password = match args.password {
        Some(password) => password,
        None => rpassword::prompt_password("Enter Nexus Password: ")
            .map_err(|e| format!("Failed to read password: {}", e))?,
    };

    build_config(&host, &repository, &username, &password)
}

/// Prompt on stdin unless a value was provided
fn prompt_value(label: &str, provided: Option<String>) -> Result<String, String> {
    if let Some(value) = provided {
        return Ok(value);
    }

    print!("{}", label);
    std::io::stdout()
        .flush()
        .map_err(|e| format!("Failed to flush stdout: {}", e))?;

    let mut value = String::new();
    std::io::stdin()
        .read_line(&mut value)
        .map_err(|e| format!("Failed to read input: {}", e))?;

    Ok(value.trim().to_string())
}

/// Validate the answers and assemble a configuration
pub(crate) fn build_config(
    host: &str,
    repository: &str,
    username: &str,
    password: &str,
) -> Result<Config, String> {
    let host = validate_host(host.trim())?;

    let repository = repository.trim().trim_matches('/');
    if repository.is_empty() {
        return Err("Repository name cannot be empty".to_string());
    }

    Ok(Config::new(host, repository, username.trim(), password))
}

/// Validate and normalize the Nexus host URL
pub(crate) fn validate_host(url_str: &str) -> Result<String, String> {
    if url_str.is_empty() {
        return Err("Nexus host cannot be empty".to_string());
    }

    // Add default http:// scheme if no scheme provided
    let url_to_parse = if url_str.contains("://") {
        url_str.to_string()
    } else {
        format!("http://{}", url_str)
    };

    let parsed_url =
        Url::parse(&url_to_parse).map_err(|e| format!("Invalid URL '{}': {}", url_str, e))?;

    match parsed_url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(format!(
                "Invalid URL scheme '{}'. Only 'http' and 'https' are supported.",
                scheme
            ));
        }
    }

    if parsed_url.host_str().is_none() {
        return Err(format!("Invalid URL '{}': missing host", url_str));
    }

    Ok(parsed_url.as_str().trim_end_matches('/').to_string())
}

/// Write the credentials file, readable by the owner only on Unix
pub(crate) fn write_credentials(path: &Path, config: &Config) -> Result<(), String> {
    let contents = config.to_file_contents().map_err(|e| e.to_string())?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
    }

    std::fs::write(path, contents)
        .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
            .map_err(|e| format!("Failed to restrict {}: {}", path.display(), e))?;
    }

    tracing::info!(path = %path.display(), "wrote credentials file");
    Ok(())
}

#[cfg(test)]
#[path = "configure_tests.rs"]
mod tests;
