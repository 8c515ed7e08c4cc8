use super::*;
use libnexus::{ComparisonStrategy, DeleteRequest, ExpressionSet, Nexus};

fn parse_filter(ctx: &AppContext, expressions: &[String], invert: bool) -> ExpressionSet {
    ExpressionSet::parse(expressions, invert).unwrap_or_else(|e| exit_with(ctx, &e.to_string()))
}

fn connect(ctx: &AppContext) -> Nexus {
    ctx.connect().unwrap_or_else(|e| exit_with(ctx, &e.to_string()))
}

/// Handle the image ls command
pub async fn handle_image_list(
    ctx: &AppContext,
    expressions: &[String],
    invert: bool,
    images_only: bool,
    format: OutputFormat,
) {
    let filter = parse_filter(ctx, expressions, invert);
    let nexus = connect(ctx);

    let spinner = ctx.formatter().spinner("Fetching images...");
    let result = nexus.list_images(&filter).await;
    spinner.finish_and_clear();

    let images = result.unwrap_or_else(|e| exit_with(ctx, &e.to_string()));
    print_output(ctx, &ImageList::new(images, images_only), format);
}

/// Handle the image tags command
pub async fn handle_image_tags(
    ctx: &AppContext,
    name: &str,
    expressions: &[String],
    invert: bool,
    sort: &str,
    format: OutputFormat,
) {
    let filter = parse_filter(ctx, expressions, invert);
    let strategy = ComparisonStrategy::from(sort);
    let nexus = connect(ctx);

    let spinner = ctx
        .formatter()
        .spinner(&format!("Fetching tags for {}...", name));
    let result = nexus.list_tags(name, &filter, strategy).await;
    spinner.finish_and_clear();

    let tags = result.unwrap_or_else(|e| exit_with(ctx, &e.to_string()));
    print_output(ctx, &TagList::new(name, tags), format);
}

/// Handle the image info command
pub async fn handle_image_info(
    ctx: &AppContext,
    name: &str,
    tag: Option<&str>,
    expressions: &[String],
    invert: bool,
    humanize: bool,
    format: OutputFormat,
) {
    let filter = parse_filter(ctx, expressions, invert);
    let nexus = connect(ctx);

    let spinner = ctx
        .formatter()
        .spinner(&format!("Fetching manifests for {}...", name));
    let result = nexus.image_info(name, tag, &filter).await;
    spinner.finish_and_clear();

    let report = result.unwrap_or_else(|e| exit_with(ctx, &e.to_string()));
    print_output(
        ctx,
        &ImageInfo::from_report(name, tag, report, humanize),
        format,
    );
}

/// Handle the image delete command
pub async fn handle_image_delete(
    ctx: &AppContext,
    name: &str,
    request: DeleteRequest,
    invert: bool,
    sort: &str,
    dry_run: bool,
) {
    let strategy = ComparisonStrategy::from(sort);
    if let Err(e) = request.validate() {
        exit_with(ctx, &e.to_string());
    }
    let nexus = connect(ctx);

    let plan = nexus
        .plan_deletion(name, &request, invert, strategy)
        .await
        .unwrap_or_else(|e| exit_with(ctx, &e.to_string()));

    if let Some(retention) = plan.retention()
        && retention.is_short()
    {
        format::info(
            ctx,
            &format!("only {} images are available", retention.available()),
        );
    }

    if plan.tags_to_delete().is_empty() {
        format::info(ctx, &format!("Nothing to delete for {}", name));
        return;
    }

    if dry_run {
        for tag in plan.tags_to_delete() {
            println!("{}", deletion_line(name, tag, true));
        }
        format::warning(ctx, "Dry run: no images were deleted");
        return;
    }

    let deleted = nexus
        .execute_deletion(&plan, |tag| println!("{}", deletion_line(name, tag, false)))
        .await
        .unwrap_or_else(|e| exit_with(ctx, &e.to_string()));

    format::success(ctx, &format!("Deleted {} tag(s) from {}", deleted, name));
}

/// Handle the image size command
pub async fn handle_image_size(ctx: &AppContext, name: &str, humanize: bool) {
    let nexus = connect(ctx);

    let spinner = ctx
        .formatter()
        .spinner(&format!("Computing size of {}...", name));
    let result = nexus.image_size(name).await;
    spinner.finish_and_clear();

    let total = result.unwrap_or_else(|e| exit_with(ctx, &e.to_string()));
    println!("{} {}", format_size(total, humanize), name);
}
