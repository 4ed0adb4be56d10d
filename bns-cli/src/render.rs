//! Console rendering of operation reports.

use colored::*;

use bns_core::types::{CheckReport, GatewayOutcome, PublisherMetadata, UpdateOutcome, VerifyReport};

pub fn check_report(report: &CheckReport) {
    println!("   {} {}", "Namehash:".dimmed(), report.node);
    println!("   {} {}", "Owner:".dimmed(), report.owner);
    println!("   {} {}", "Resolver:".dimmed(), report.resolver);

    let Some(publisher) = &report.publisher else {
        println!(
            "\n{}",
            "⚠️  Domain resolver is NOT set to the IPNS contract".yellow().bold()
        );
        println!("   {} {}", "Expected:".dimmed(), report.expected_publisher);
        println!("   {} {}", "Actual:".dimmed(), report.resolver);
        return;
    };

    println!(
        "\n{}",
        "✅ Domain resolver is correctly set to the IPNS contract".green().bold()
    );
    metadata(&publisher.metadata);
    gateways(&publisher.gateways);
}

pub fn verify_report(report: &VerifyReport) {
    metadata(&report.metadata);
    gateways(&report.gateways);

    println!(
        "\n{} {}",
        "Verification completed for IPNS record:".green().bold(),
        report.metadata.ipns_record
    );
}

pub fn update_outcome(outcome: &UpdateOutcome) {
    let record = &outcome.record;

    println!("\n{}", "✅ Contenthash updated and verified".green().bold());
    println!("   {} {}", "Transaction:".dimmed(), record.transaction_hash);
    println!("   {} {}", "Resolver:".dimmed(), record.resolver_address);
    println!("   {} {}", "Old contenthash:".dimmed(), record.old_contenthash);
    println!("   {} {}", "New contenthash:".dimmed(), record.new_contenthash);
    println!("   {} {}", "Record saved to:".dimmed(), outcome.audit_path.display());

    if !outcome.warnings.is_empty() {
        println!("\n{}", "⚠️  Proceeded past warnings:".yellow());
        for warning in &outcome.warnings {
            println!("   - {warning}");
        }
    }

    let (site, ipfs) = access_urls(&record.domain, &record.new_cid);
    println!("\n{}", "🌐 Access your content:".cyan().bold());
    println!("   {site}");
    println!("   {ipfs}");
    println!(
        "\n   {}",
        "Note: the contenthash holds the CID text, not an EIP-1577 value. \
         Standard resolvers may not recognize it."
            .dimmed()
    );
}

/// Site and raw-IPFS URLs for a freshly updated domain.
fn access_urls(domain: &str, cid: &str) -> (String, String) {
    (
        format!("https://{domain}.me/"),
        format!("https://ipfs.io/ipfs/{cid}"),
    )
}

fn metadata(metadata: &PublisherMetadata) {
    println!("   {} {}", "Domain:".dimmed(), metadata.domain);
    println!("   {} {}", "IPNS record:".dimmed(), metadata.ipns_record);
}

fn gateways(outcomes: &[GatewayOutcome]) {
    println!("\n{}", "📡 Gateways:".cyan().bold());

    for outcome in outcomes {
        match &outcome.result {
            Ok(response) => {
                println!(
                    "   {} {} ({})",
                    "✓".green(),
                    outcome.gateway,
                    outcome.url.dimmed()
                );
                println!(
                    "      {} {}  {} {}  {} {} bytes",
                    "Status:".dimmed(),
                    response.status,
                    "Type:".dimmed(),
                    response.content_type.as_deref().unwrap_or("unknown"),
                    "Size:".dimmed(),
                    response.content_length
                );
                if let Some(preview) = &response.preview {
                    println!("      {}", "Preview:".dimmed());
                    println!("      {preview}");
                }
            }
            Err(reason) => {
                println!(
                    "   {} {} ({})",
                    "✗".red(),
                    outcome.gateway,
                    outcome.url.dimmed()
                );
                println!("      {}", reason.red());
            }
        }
    }
}
