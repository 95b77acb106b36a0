//! PowerShell project picker generated per window.
//!
//! The picker lists the subdirectories of the projects root, filters them as
//! the user types, and on Enter changes into the chosen project and runs the
//! tool command. With more than one account profile it first asks which one
//! to use and exports `CLAUDE_CONFIG_DIR` / `ANTHROPIC_API_KEY` for it.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::config::{expand_path, Profile};

const PICKER_TEMPLATE: &str = r#"
$R   = [char]27 + '[0m'
$DIM = [char]27 + '[90m'
$CYN = [char]27 + '[96m'
$WHT = [char]27 + '[97m'
$GRN = [char]27 + '[92m'
$RED = [char]27 + '[91m'
$INV = [char]27 + '[7m'
$HID = [char]27 + '[?25l'
$SHW = [char]27 + '[?25h'

$profileNames = @@PROFILE_NAMES@@
$profileDirs  = @@PROFILE_DIRS@@
$profileKeys  = @@PROFILE_KEYS@@

$d = '@@WORKING_DIR@@'
$all = @(Get-ChildItem $d -Directory | Select-Object -ExpandProperty Name)

if ($all.Count -eq 0) {
    Write-Host ""
    Write-Host "  ${RED}No projects in $d${R}"
    Write-Host ""
    Read-Host "  Press Enter"
    exit
}

$filter = ""
$sel = 0
$viewOffset = 0
$maxShow = 12

function Draw {
    param($items, $sel, $filter, $startY, $viewOffset)

    $termH = $Host.UI.RawUI.WindowSize.Height
    $script:maxShow = [Math]::Max(1, $termH - $startY - 4)

    $maxOff = [Math]::Max(0, $items.Count - $script:maxShow)
    if ($viewOffset -gt $maxOff) { $viewOffset = $maxOff }
    $script:viewOffset = $viewOffset

    $row = $startY + 1
    Write-Host "$([char]27)[${row};1H" -NoNewline

    if ($filter -eq "") {
        Write-Host "  ${CYN}>${R} ${DIM}type to filter...${R}                    " -NoNewline
    } else {
        Write-Host "  ${CYN}>${R} ${WHT}$filter${R}                              " -NoNewline
    }
    Write-Host ""
    Write-Host "  ${DIM}---------------------------------${R}      "

    for ($i = 0; $i -lt $script:maxShow; $i++) {
        $itemIdx = $viewOffset + $i
        if ($itemIdx -lt $items.Count) {
            $name = $items[$itemIdx]
            if ($itemIdx -eq $sel) {
                Write-Host "  ${INV}${CYN} > ${WHT}$name ${R}                              "
            } else {
                Write-Host "    ${DIM}$name${R}                                   "
            }
        } else {
            Write-Host "                                          "
        }
    }

    Write-Host ""
    if ($items.Count -gt $script:maxShow) {
        Write-Host "  ${DIM}up/down${R} navigate  ${DIM}($($sel+1)/$($items.Count))${R}  ${DIM}esc${R} quit     " -NoNewline
    } else {
        Write-Host "  ${DIM}up/down${R} navigate  ${DIM}enter${R} select  ${DIM}esc${R} quit     " -NoNewline
    }
}

function FilterList {
    param($items, $query)
    if ($query -eq "") { return $items }
    $q = $query.ToLower()
    return @($items | Where-Object { $_.ToLower().Contains($q) })
}

function UseProfile {
    param($idx)
    $env:CLAUDE_CONFIG_DIR = $profileDirs[$idx]
    if ($profileKeys[$idx] -ne '') {
        $env:ANTHROPIC_API_KEY = $profileKeys[$idx]
    }
}

Write-Host "$([char]27)[2J$([char]27)[H${HID}" -NoNewline

# let the terminal settle after it was moved
Start-Sleep -Milliseconds 50

Write-Host ""
Write-Host "  ${CYN}@@LABEL@@${R} ${DIM}- select project${R}"
Write-Host ""

$startY = 3
$filtered = $all
Draw $filtered $sel $filter $startY $viewOffset

$readErr = 0
try {
while ($true) {
    try {
        $key = $Host.UI.RawUI.ReadKey('NoEcho,IncludeKeyDown')
        $readErr = 0
    } catch {
        $readErr++
        if ($readErr -ge 20) {
            Write-Host "${SHW}" -NoNewline
            Write-Host ""
            Write-Host "  ${RED}Input error${R}"
            exit 1
        }
        Start-Sleep -Milliseconds 50
        continue
    }
    $vk = $key.VirtualKeyCode
    $ch = $key.Character

    if ($vk -eq 27) {
        Write-Host "${SHW}" -NoNewline
        Clear-Host
        exit
    }

    if ($vk -eq 13) {
        if ($filtered.Count -gt 0) {
            $chosen = $filtered[$sel]
            Write-Host "${SHW}" -NoNewline
            Clear-Host
            Write-Host ""
            Write-Host "  ${GRN}>${R} ${WHT}$chosen${R}"
            Write-Host ""

            if ($profileNames.Count -gt 1) {
                Write-Host "  ${CYN}@@LABEL@@${R} ${DIM}- select account${R}"
                Write-Host "  ${DIM}---------------------------------${R}"
                for ($pi = 0; $pi -lt $profileNames.Count; $pi++) {
                    $num = $pi + 1
                    Write-Host "  ${WHT}${num}${R}  ${DIM}$($profileNames[$pi])${R}"
                }
                Write-Host ""
                Write-Host "  ${CYN}>${R} " -NoNewline

                $picked = $false
                while (-not $picked) {
                    try {
                        $aKey = $Host.UI.RawUI.ReadKey('NoEcho,IncludeKeyDown')
                    } catch { continue }
                    $aVk = $aKey.VirtualKeyCode
                    if ($aVk -eq 27) {
                        Clear-Host
                        exit
                    }
                    $aNum = $aVk - 48
                    if ($aNum -ge 1 -and $aNum -le $profileNames.Count) {
                        UseProfile ($aNum - 1)
                        Write-Host "$($profileNames[$aNum - 1])"
                        Write-Host ""
                        $picked = $true
                    }
                }
            } elseif ($profileNames.Count -eq 1) {
                UseProfile 0
            }

            Set-Location (Join-Path $d $chosen)
            @@COMMAND@@
            break
        }
    }

    if ($vk -eq 38) {
        if ($sel -gt 0) {
            $sel--
            if ($sel -lt $viewOffset) { $viewOffset = $sel }
        }
        Draw $filtered $sel $filter $startY $viewOffset
        continue
    }

    if ($vk -eq 40) {
        if ($sel -lt ($filtered.Count - 1)) {
            $sel++
            if ($sel -ge ($viewOffset + $maxShow)) { $viewOffset = $sel - $maxShow + 1 }
        }
        Draw $filtered $sel $filter $startY $viewOffset
        continue
    }

    if ($vk -eq 8) {
        if ($filter.Length -gt 0) {
            $filter = $filter.Substring(0, $filter.Length - 1)
            $filtered = @(FilterList $all $filter)
            $sel = 0
            $viewOffset = 0
            Draw $filtered $sel $filter $startY $viewOffset
        }
        continue
    }

    $code = [int]$ch
    if ($code -gt 32 -and $code -le 126) {
        $filter += $ch
        $filtered = @(FilterList $all $filter)
        $sel = 0
        $viewOffset = 0
        Draw $filtered $sel $filter $startY $viewOffset
    }
}
} finally {
    Write-Host "${SHW}" -NoNewline
}
"#;

/// Single-quoted PowerShell literal; `'` is escaped by doubling.
fn ps_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

fn ps_array(items: impl Iterator<Item = String>) -> String {
    let quoted: Vec<String> = items.map(|s| ps_quote(&s)).collect();
    format!("@({})", quoted.join(","))
}

/// Substitute `@@NAME@@` placeholders in one pass over `template`. Values
/// are never rescanned, so a placeholder inside a value stays literal.
fn fill(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("@@") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let hit = after.find("@@").and_then(|end| {
            let name = &after[..end];
            vars.iter().find(|(k, _)| *k == name).map(|(_, v)| (end, *v))
        });
        match hit {
            Some((end, value)) => {
                out.push_str(value);
                rest = &after[end + 2..];
            }
            None => {
                out.push_str("@@");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Build the picker script for one window. Profile directories are expanded
/// (`~/` -> home) before being embedded.
pub fn build_picker(working_dir: &str, command: &str, label: &str, profiles: &[Profile]) -> String {
    let names = ps_array(profiles.iter().map(|p| p.name.clone()));
    let dirs = ps_array(profiles.iter().map(|p| expand_path(&p.config_dir)));
    let keys = ps_array(profiles.iter().map(|p| p.api_key.clone().unwrap_or_default()));

    let working_dir = working_dir.replace('\'', "''");
    fill(
        PICKER_TEMPLATE,
        &[
            ("PROFILE_NAMES", names.as_str()),
            ("PROFILE_DIRS", dirs.as_str()),
            ("PROFILE_KEYS", keys.as_str()),
            ("WORKING_DIR", working_dir.as_str()),
            ("LABEL", label),
            ("COMMAND", command),
        ],
    )
}

/// Encode for `powershell -EncodedCommand`: base64 over UTF-16LE.
pub fn encode_powershell(script: &str) -> String {
    let bytes: Vec<u8> = script.encode_utf16().flat_map(|u| u.to_le_bytes()).collect();
    STANDARD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_utf16le_base64() {
        // "ab" -> 61 00 62 00
        assert_eq!(encode_powershell("ab"), "YQBiAA==");
        assert_eq!(encode_powershell(""), "");
    }

    #[test]
    fn embeds_dir_label_and_command() {
        let script = build_picker("C:\\dev", "claude --dangerously-skip-permissions", "cc", &[]);
        assert!(script.contains("$d = 'C:\\dev'"));
        assert!(script.contains("${CYN}cc${R}"));
        assert!(script.contains("claude --dangerously-skip-permissions"));
        assert!(script.contains("$profileNames = @()"));
        assert!(!script.contains("@@"));
    }

    #[test]
    fn quotes_are_doubled() {
        let profiles = vec![Profile {
            name: "Bob's".into(),
            config_dir: "/cfg/bob".into(),
            api_key: Some("sk-'x".into()),
        }];
        let script = build_picker("C:\\it's", "claude", "cc", &profiles);
        assert!(script.contains("$d = 'C:\\it''s'"));
        assert!(script.contains("$profileNames = @('Bob''s')"));
        assert!(script.contains("$profileKeys  = @('sk-''x')"));
    }

    #[test]
    fn placeholders_in_user_data_stay_literal() {
        let profiles = vec![Profile { name: "@@LABEL@@".into(), config_dir: "/a".into(), api_key: None }];
        let script = build_picker("C:\\dev\\@@COMMAND@@", "claude", "cc", &profiles);
        assert!(script.contains("$d = 'C:\\dev\\@@COMMAND@@'"));
        assert!(script.contains("$profileNames = @('@@LABEL@@')"));
        assert!(script.contains("${CYN}cc${R}"));
    }

    #[test]
    fn fill_leaves_unknown_markers() {
        assert_eq!(fill("a @@X@@ b @@Y@@", &[("X", "1")]), "a 1 b @@Y@@");
        assert_eq!(fill("@@", &[]), "@@");
    }

    #[test]
    fn profiles_without_key_embed_empty_string() {
        let profiles = vec![
            Profile { name: "A".into(), config_dir: "/a".into(), api_key: None },
            Profile { name: "B".into(), config_dir: "/b".into(), api_key: Some("k".into()) },
        ];
        let script = build_picker("/p", "claude", "cc", &profiles);
        assert!(script.contains("$profileDirs  = @('/a','/b')"));
        assert!(script.contains("$profileKeys  = @('','k')"));
    }
}
